//! Tests for member lookup on nominal types and unions.

use super::*;

fn setup() -> (DefinitionStore, WellKnownTypes) {
    let mut db = DefinitionStore::new();
    let wk = WellKnownTypes::install(&mut db);
    (db, wk)
}

fn names(table: &MemberTable) -> Vec<&str> {
    table.keys().map(|name| &**name).collect()
}

#[test]
fn test_string_length() {
    let (db, wk) = setup();
    let found = find_members_by_name(&db, &wk.string, "length");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].ty, wk.number);
    assert!(found[0].is_const);
}

#[test]
fn test_literals_have_no_members() {
    let (db, wk) = setup();
    let literal = wk.literal(LiteralValue::String(Name::from("abc")));
    assert!(find_members_by_name(&db, &literal, "length").is_empty());
    assert!(member_table(&db, &literal).is_empty());
    assert!(find_members_by_name(&db, &Type::Unknown, "length").is_empty());
}

#[test]
fn test_members_found_on_base() {
    let (mut db, wk) = setup();
    let animal = db.register(
        "Animal",
        None,
        vec![
            MemberDef::property("name", wk.string.clone()),
            MemberDef::property("sound", wk.number.clone()),
        ],
    );
    let dog = db.register(
        "Dog",
        Some(animal),
        vec![MemberDef::property("sound", wk.string.clone())],
    );

    let name = find_members_by_name(&db, &dog, "name");
    assert_eq!(name.len(), 1);
    assert_eq!(name[0].owner.as_deref(), Some("Animal"));

    let sound = find_members_by_name(&db, &dog, "sound");
    assert_eq!(sound.len(), 1);
    assert_eq!(sound[0].ty, wk.string, "derived member shadows base");

    let table = member_table(&db, &dog);
    assert_eq!(names(&table), vec!["sound", "name"]);
    assert_eq!(table["sound"][0].owner.as_deref(), Some("Dog"));
}

#[test]
fn test_union_keeps_shared_members() {
    let (mut db, wk) = setup();
    let a = db.register(
        "A",
        None,
        vec![
            MemberDef::property("x", wk.number.clone()),
            MemberDef::property("y", wk.string.clone()),
        ],
    );
    let b = db.register(
        "B",
        None,
        vec![
            MemberDef::property("x", wk.number.clone()),
            MemberDef::property("z", wk.boolean.clone()),
        ],
    );
    let union = create_union(vec![a, b]);

    assert_eq!(names(&member_table(&db, &union)), vec!["x"]);
    assert_eq!(find_members_by_name(&db, &union, "x").len(), 1);
    assert!(find_members_by_name(&db, &union, "y").is_empty());
}

#[test]
fn test_union_drops_disagreeing_members() {
    let (mut db, wk) = setup();
    let a = db.register(
        "A",
        None,
        vec![
            MemberDef::property("x", wk.number.clone()),
            MemberDef::property("c", wk.number.clone()),
        ],
    );
    let b = db.register(
        "B",
        None,
        vec![
            MemberDef::property("x", wk.string.clone()),
            MemberDef::mutable_property("c", wk.number.clone()),
        ],
    );
    let union = create_union(vec![a, b]);
    assert!(find_members_by_name(&db, &union, "x").is_empty());
    assert!(find_members_by_name(&db, &union, "c").is_empty());
}

#[test]
fn test_union_intersection_is_order_independent() {
    let (mut db, wk) = setup();
    let xy = |db: &mut DefinitionStore, name: &str| {
        db.register(
            name,
            None,
            vec![
                MemberDef::property("x", wk.number.clone()),
                MemberDef::property("y", wk.number.clone()),
            ],
        )
    };
    let a = xy(&mut db, "A");
    let b = xy(&mut db, "B");
    let c = db.register("C", None, vec![MemberDef::property("x", wk.number.clone())]);

    let forward = member_table(&db, &create_union(vec![a.clone(), b.clone(), c.clone()]));
    let backward = member_table(&db, &create_union(vec![c, b, a]));
    assert_eq!(names(&forward), vec!["x"]);
    assert_eq!(names(&backward), vec!["x"]);
}

#[test]
fn test_overloads_dropped_from_union() {
    let (mut db, wk) = setup();
    let f = |ret: &Type| Type::func(Vec::new(), ret.clone());
    let a = db.register(
        "A",
        None,
        vec![
            MemberDef::method("f", Vec::new(), f(&wk.number)),
            MemberDef::method("f", Vec::new(), f(&wk.string)),
        ],
    );
    let b = db.register(
        "B",
        None,
        vec![MemberDef::method("f", Vec::new(), f(&wk.number))],
    );

    assert_eq!(find_members_by_name(&db, &a, "f").len(), 2);
    assert!(find_members_by_name(&db, &create_union(vec![a, b]), "f").is_empty());
}

#[test]
fn test_union_of_lists_shares_length() {
    let (db, wk) = setup();
    let union = create_union(vec![
        wk.list_of(wk.number.clone()),
        wk.list_of(wk.string.clone()),
    ]);
    let length = find_members_by_name(&db, &union, "length");
    assert_eq!(length.len(), 1);
    assert_eq!(length[0].ty, wk.number);
    assert!(find_members_by_name(&db, &union, "get").is_empty());
}

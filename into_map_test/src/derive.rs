use core::fmt;
use into_map::{string_map, IntoMap};

#[derive(IntoMap)]
struct User {
    id: u32,
    #[into_map(ignore)]
    secret: String,
    #[into_map(rename = "full_name")]
    name: String,
}

fn user() -> User {
    User {
        id: 1,
        secret: "hunter2".to_string(),
        name: "Ada Lovelace".to_string(),
    }
}

#[test]
fn ignores_and_renames() {
    let map = user().into_map();
    assert_eq!(map, string_map! {
        "id" => 1,
        "full_name" => "Ada Lovelace",
    });
    assert!(!map.contains_key("secret"));
    assert!(!map.contains_key("name"));
    assert_eq!(user().secret, "hunter2");
}

#[test]
fn unannotated_fields_are_all_present() {
    #[derive(IntoMap)]
    struct Point {
        x: i64,
        y: i64,
        z: f32,
    }

    let map = Point { x: -1, y: 2, z: 0.5 }.into_map();
    assert_eq!(map, string_map! { "x" => -1, "y" => 2, "z" => 0.5 });
}

#[test]
fn entries_keep_declaration_order() {
    #[derive(IntoMap)]
    struct Ordered {
        zeta: u8,
        #[into_map(rename = "beta")]
        alpha: u8,
        mid: u8,
    }

    let value = Ordered { zeta: 1, alpha: 2, mid: 3 };
    let keys = value.into_entries().into_iter().map(|(k, _)| k).collect::<Vec<_>>();
    assert_eq!(keys, ["zeta", "beta", "mid"]);

    let sorted = value.into_map().into_iter().map(|(k, _)| k).collect::<Vec<_>>();
    assert_eq!(sorted, ["beta", "mid", "zeta"]);
}

#[test]
fn empty_struct_is_empty_map() {
    #[derive(IntoMap)]
    struct Empty {}

    assert!(Empty {}.into_map().is_empty());
    assert!(Empty {}.into_entries().is_empty());
}

#[test]
fn ignore_wins_over_rename() {
    #[derive(IntoMap)]
    struct Credentials {
        user: String,
        #[into_map(rename = "pw", ignore)]
        password: String,
        #[into_map(rename = "tok")]
        #[into_map(ignore)]
        token: String,
    }

    let creds = Credentials {
        user: "ada".to_string(),
        password: "hunter2".to_string(),
        token: "abc".to_string(),
    };
    assert_eq!(creds.into_map(), string_map! { "user" => "ada" });
    assert_eq!(creds.password.len() + creds.token.len(), 10);
}

#[test]
fn first_rename_wins() {
    #[derive(IntoMap)]
    struct Renamed {
        #[into_map(rename = "first")]
        #[into_map(rename = "second")]
        value: u8,
    }

    assert_eq!(Renamed { value: 9 }.into_map(), string_map! { "first" => 9 });
}

#[test]
fn malformed_annotations_are_ignored() {
    #[derive(IntoMap)]
    struct Lenient {
        #[into_map]
        a: u8,
        #[into_map = "ignore"]
        b: u8,
        #[into_map(ignore = true)]
        c: u8,
        #[into_map(rename = 5)]
        d: u8,
        #[into_map(rename)]
        e: u8,
        #[into_map(name = "other")]
        f: u8,
        #[into_map(ignore, rename = secret_key)]
        g: u8,
        #[into_map(rename = "h2", bogus = some_ident)]
        h: u8,
    }

    let map = Lenient { a: 1, b: 2, c: 3, d: 4, e: 5, f: 6, g: 7, h: 8 }.into_map();
    assert_eq!(map, string_map! {
        "a" => 1, "b" => 2, "c" => 3, "d" => 4, "e" => 5, "f" => 6, "h2" => 8,
    });
}

#[test]
fn raw_identifiers() {
    #[derive(IntoMap)]
    struct Item {
        r#type: &'static str,
    }

    assert_eq!(Item { r#type: "book" }.into_map(), string_map! { "type" => "book" });
}

struct Celsius(f64);

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

#[test]
fn values_use_display() {
    #[derive(IntoMap)]
    struct Reading {
        sensor: char,
        temperature: Celsius,
        ok: bool,
    }

    let reading = Reading { sensor: 'A', temperature: Celsius(21.5), ok: true };
    assert_eq!(reading.into_map(), string_map! {
        "sensor" => 'A',
        "temperature" => "21.5°C",
        "ok" => true,
    });
}

#[test]
fn generic_structs() {
    #[derive(IntoMap)]
    struct Tagged<'a, T, U> {
        label: &'a str,
        value: T,
        #[into_map(ignore)]
        extra: U,
    }

    struct NotDisplay;

    let tagged = Tagged { label: "answer", value: 42u64, extra: NotDisplay };
    assert_eq!(tagged.into_map(), string_map! { "label" => "answer", "value" => 42 });
    let _extra: NotDisplay = tagged.extra;
}

#[test]
fn works_through_references_and_trait_objects() {
    fn render(value: &dyn IntoMap) -> Vec<(String, String)> {
        value.into_entries()
    }

    let user = user();
    assert_eq!(render(&user), vec![
        ("id".to_string(), "1".to_string()),
        ("full_name".to_string(), "Ada Lovelace".to_string()),
    ]);
    assert_eq!((&user).into_map(), user.into_map());
}

mod nested {
    use into_map::IntoMap;

    #[derive(IntoMap)]
    pub struct Private {
        field: u8,
    }

    impl Private {
        pub fn new(field: u8) -> Self {
            Self { field }
        }
    }
}

#[test]
fn private_fields() {
    let map = nested::Private::new(3).into_map();
    assert_eq!(map, string_map! { "field" => 3 });
}

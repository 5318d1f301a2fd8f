use dynq::{Record, Value};

#[derive(Clone, Record)]
pub struct Member {
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    #[record(rename = "team.name")]
    pub team_name: Option<String>,
    #[record(skip)]
    pub scratch: Vec<u8>,
}

fn main() {
    let mut member = Member {
        id: 1,
        username: None,
        age: 10,
        team_name: Some("teamA".to_string()),
        scratch: vec![],
    };

    assert_eq!(member.get("team.name"), Value::from("teamA"));
    assert_eq!(member.get("scratch"), Value::Null);

    member.set("username", Value::from("member1")).unwrap();
    assert_eq!(member.username.as_deref(), Some("member1"));
    assert!(member.set("age", Value::from("ten")).is_err());
    assert!(member.set("nope", Value::Null).is_err());
}

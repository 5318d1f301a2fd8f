use dynq::{Condition, Predicate};

#[derive(Default, Condition)]
pub struct MemberSearchCondition {
    #[condition(eq = "username")]
    pub username: Option<String>,
    #[condition(eq = "team.name")]
    pub team_name: Option<String>,
    #[condition(goe = "age")]
    pub age_goe: Option<i32>,
    #[condition(loe = "age")]
    pub age_loe: Option<i32>,
    #[condition(gt = "id")]
    #[condition(lt = "id")]
    pub id_around: Option<i64>,
    /// Not a criterion.
    pub note: String,
}

#[derive(Condition)]
pub struct Wrapped<T: Clone + Into<dynq::Value>> {
    #[condition(eq = "value")]
    pub value: Option<T>,
}

fn main() {
    let cond = MemberSearchCondition::default();
    assert_eq!(cond.to_predicate(), Predicate::True);

    let cond = Wrapped { value: Some(3) };
    assert_eq!(cond.to_predicate(), Predicate::equals("value", 3));
}

//! Field visibility from conditional logic.

use formsmith_core::enums::{Combinator, LogicAction};
use formsmith_core::field::Field;
use formsmith_core::values::FormValues;

use crate::condition::evaluate;

/// Returns whether a field is shown under the current values.
///
/// Fields without rules are always visible. `OR` needs any rule to hold,
/// every other combinator needs all of them. `hide` negates the combined
/// result; actions other than `show` and `hide` leave the field visible.
pub fn is_visible(field: &Field, values: &FormValues) -> bool {
    let Some(logic) = field.active_logic() else {
        return true;
    };

    let mut results = logic.rules.iter().map(|rule| evaluate(rule, values));
    let matched = match logic.combinator {
        Combinator::Or => results.any(|r| r),
        _ => results.all(|r| r),
    };

    match logic.action {
        LogicAction::Show => matched,
        LogicAction::Hide => !matched,
        _ => true,
    }
}

/// Filters a field list down to the fields currently visible, in order.
pub fn visible_fields<'a>(fields: &'a [Field], values: &FormValues) -> Vec<&'a Field> {
    fields.iter().filter(|f| is_visible(f, values)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_core::enums::{FieldType, Operator};
    use formsmith_core::field::FieldBuilder;
    use formsmith_core::values::FormValue;

    fn values(pairs: &[(&str, FormValue)]) -> FormValues {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn no_logic_is_visible() {
        let field = FieldBuilder::new(FieldType::Text, "a").build();
        assert!(is_visible(&field, &FormValues::new()));
    }

    #[test]
    fn show_when_country_is_other() {
        let field = FieldBuilder::new(FieldType::Text, "other_country")
            .rule("country", Operator::Equals, "other")
            .action(LogicAction::Show)
            .build();
        assert!(is_visible(&field, &values(&[("country", "other".into())])));
        assert!(!is_visible(&field, &values(&[("country", "us".into())])));
        assert!(!is_visible(&field, &FormValues::new()));
    }

    #[test]
    fn combinators() {
        let or = FieldBuilder::new(FieldType::Text, "t")
            .rule("a", Operator::Equals, "1")
            .rule("b", Operator::Equals, "1")
            .combinator(Combinator::Or)
            .build();
        let and = FieldBuilder::new(FieldType::Text, "t")
            .rule("a", Operator::Equals, "1")
            .rule("b", Operator::Equals, "1")
            .combinator(Combinator::And)
            .build();
        let v = values(&[("a", "1".into()), ("b", "0".into())]);
        assert!(is_visible(&or, &v));
        assert!(!is_visible(&and, &v));
    }

    #[test]
    fn hide_negates() {
        let field = FieldBuilder::new(FieldType::Text, "t")
            .rule("a", Operator::IsNotEmpty, "")
            .action(LogicAction::Hide)
            .build();
        assert!(is_visible(&field, &FormValues::new()));
        assert!(!is_visible(&field, &values(&[("a", "x".into())])));
    }

    #[test]
    fn non_visibility_actions_stay_visible() {
        for action in [
            LogicAction::Enable,
            LogicAction::Disable,
            LogicAction::Require,
            LogicAction::Unrequire,
            LogicAction::from("blink"),
        ] {
            let field = FieldBuilder::new(FieldType::Text, "t")
                .rule("a", Operator::Equals, "never")
                .action(action)
                .build();
            assert!(is_visible(&field, &FormValues::new()));
        }
    }

    #[test]
    fn unknown_combinator_means_all() {
        let field = FieldBuilder::new(FieldType::Text, "t")
            .rule("a", Operator::Equals, "1")
            .rule("b", Operator::Equals, "1")
            .combinator(Combinator::from("XOR"))
            .build();
        assert!(!is_visible(&field, &values(&[("a", "1".into())])));
        assert!(is_visible(&field, &values(&[("a", "1".into()), ("b", "1".into())])));
    }

    #[test]
    fn total_over_missing_references() {
        let ops = Operator::BUILTIN.iter().cloned().chain([Operator::from("weird")]);
        for op in ops {
            let field = FieldBuilder::new(FieldType::Text, "t")
                .rule("ghost", op.clone(), "v")
                .build();
            let _ = is_visible(&field, &FormValues::new());
        }
    }

    #[test]
    fn visible_fields_preserves_order() {
        let fields = vec![
            FieldBuilder::new(FieldType::Text, "a").build(),
            FieldBuilder::new(FieldType::Text, "b")
                .rule("a", Operator::Equals, "x")
                .build(),
            FieldBuilder::new(FieldType::Text, "c").build(),
        ];
        let ids: Vec<_> = visible_fields(&fields, &FormValues::new())
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}

use std::env;
use minirules::prelude::*;


/// Tests for the JSON form of rulesets.
#[cfg(test)]
pub mod serialize_tests {
    use super::*;

    fn data() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![1.0, 0.0, 1.0, 0.0, 1.0],
        ]
    }

    fn ruleset() -> Ruleset {
        let mut first = Rule::with_prediction(1, true);
        first.add_cond(Condition::range("a", 0, 1.0, 3.0).unwrap()).unwrap();
        first.add_cond(Condition::equals("b", 1, 1.0)).unwrap();

        let mut second = Rule::with_prediction(1, false);
        second.add_cond(Condition::le("b", 1, 0.0)).unwrap();
        second.add_cond(Condition::ge("a", 0, 3.0)).unwrap();

        Ruleset::from(vec![first, second])
    }


    #[test]
    fn json_keeps_coverage() {
        let x = data();
        let ruleset = ruleset();
        let json = ruleset.to_json().unwrap();
        let restored = Ruleset::from_json(&json).unwrap();

        assert_eq!(restored, ruleset);
        let all = [0, 1, 2, 3, 4];
        for (a, b) in ruleset.iter().zip(&restored) {
            assert_eq!(a.covered_indices(&x, &all), b.covered_indices(&x, &all));
            assert_eq!(a.learned_order(), b.learned_order());
        }
        assert_eq!(restored.to_string(), ruleset.to_string());
    }


    #[test]
    fn json_layout() {
        let cond = Condition::range("a", 0, 1.0, 3.0).unwrap();
        let value = serde_json::to_value(&cond).unwrap();
        assert_eq!(value["feature"], "a");
        assert_eq!(value["index"], 0);
        assert_eq!(value["operator"], "range");
        assert_eq!(value["values"], serde_json::json!([1.0, 3.0]));
    }


    #[test]
    fn corrupt_json_is_rejected() {
        let bad_arity = r#"{"feature":"a","index":0,"operator":"<=","values":[1.0,2.0]}"#;
        assert!(serde_json::from_str::<Condition>(bad_arity).is_err());

        let bad_operator = r#"{"feature":"a","index":0,"operator":"==","values":[1.0]}"#;
        assert!(serde_json::from_str::<Condition>(bad_operator).is_err());

        assert!(matches!(
            Ruleset::from_json("not json"),
            Err(RuleError::Json(_))
        ));
    }


    #[test]
    fn save_and_load() {
        let mut path = env::temp_dir();
        path.push(format!("minirules-{}.json", std::process::id()));

        let ruleset = ruleset();
        ruleset.save(&path).unwrap();
        let loaded = Ruleset::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, ruleset);

        assert!(matches!(
            Ruleset::load(&path),
            Err(RuleError::Io { .. })
        ));
    }
}

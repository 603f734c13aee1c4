use minirules::prelude::*;
use minirules::Test;


/// Tests for `Condition`.
#[cfg(test)]
pub mod condition_tests {
    use super::*;

    fn column() -> Vec<Vec<f64>> {
        vec![vec![0.0, 1.0, 2.0, 3.0, 4.0]]
    }

    #[test]
    fn range_covers_closed_interval() {
        let x = column();
        let cond = Condition::range("x", 0, 1.0, 3.0).unwrap();
        let all = [0, 1, 2, 3, 4];

        assert_eq!(cond.covered_indices(&x, &all), vec![1, 2, 3]);
        assert_eq!(cond.not_covered_indices(&x, &all), vec![0, 4]);
    }


    #[test]
    fn coverage_partitions_indices() {
        let x = column();
        let all = [0, 1, 2, 3, 4];
        let conditions = vec![
            Condition::le("x", 0, 2.0),
            Condition::ge("x", 0, 2.0),
            Condition::range("x", 0, 0.5, 2.5).unwrap(),
            Condition::one_of("x", 0, [0.0, 4.0]).unwrap(),
        ];

        for cond in conditions {
            let covered = cond.covered_indices(&x, &all);
            let uncovered = cond.not_covered_indices(&x, &all);
            let mut joined = covered.iter()
                .chain(&uncovered)
                .copied()
                .collect::<Vec<_>>();
            joined.sort_unstable();

            assert_eq!(joined, all, "{cond}");
            assert!(covered.iter().all(|i| !uncovered.contains(i)));
        }
    }


    #[test]
    fn coverage_respects_subset() {
        let x = column();
        let cond = Condition::ge("x", 0, 2.0);
        assert_eq!(cond.covered_indices(&x, &[0, 3]), vec![3]);
        assert_eq!(cond.not_covered_indices(&x, &[0, 3]), vec![0]);
        assert!(cond.covered_indices(&x, &[]).is_empty());
    }


    #[test]
    fn parse_operators() {
        assert_eq!("<=".parse::<Operator>().unwrap(), Operator::Le);
        assert_eq!(">=".parse::<Operator>().unwrap(), Operator::Ge);
        assert_eq!("range".parse::<Operator>().unwrap(), Operator::Range);
        assert_eq!("in".parse::<Operator>().unwrap(), Operator::In);
        assert!(matches!(
            "==".parse::<Operator>(),
            Err(RuleError::UnknownOperator(_))
        ));
    }


    #[test]
    fn arity_is_checked() {
        assert!(matches!(
            Condition::new("x", 0, Operator::Range, 1.0),
            Err(RuleError::InvalidArity { .. })
        ));
        assert!(matches!(
            Condition::range("x", 0, 3.0, 1.0),
            Err(RuleError::InvalidRange { .. })
        ));
        assert!(matches!(
            Condition::one_of("x", 0, Vec::<f64>::new()),
            Err(RuleError::InvalidArity { .. })
        ));
    }


    #[test]
    fn modify_tightens_bounds() {
        let mut cond = Condition::le("x", 0, 3.0);
        assert!(cond.modify(Operator::Le, 2.0).unwrap());
        assert!(!cond.modify(Operator::Le, 5.0).unwrap());
        assert_eq!(cond.values(), vec![2.0]);

        assert!(cond.modify(Operator::Ge, 1.0).unwrap());
        assert_eq!(cond.operator(), Operator::Range);
        assert_eq!(cond.test(), &Test::Range(1.0, 2.0));

        assert!(!cond.modify(Operator::Ge, 0.0).unwrap());
        assert!(cond.modify(Operator::Ge, 1.5).unwrap());
        assert_eq!(cond.values(), vec![1.5, 2.0]);
    }


    #[test]
    fn modify_rejects_mixed_operators() {
        let mut cond = Condition::equals("x", 0, 1.0);
        assert!(matches!(
            cond.modify(Operator::Le, 2.0),
            Err(RuleError::BadOperatorCombination { .. })
        ));

        let mut cond = Condition::le("x", 0, 1.0);
        assert!(matches!(
            cond.modify(Operator::Ge, 2.0),
            Err(RuleError::InvalidRange { .. })
        ));
        assert_eq!(cond.test(), &Test::Le(1.0));
    }


    #[test]
    fn in_conditions_grow() {
        let mut cond = Condition::equals("x", 0, 1.0);
        assert!(cond.modify(Operator::In, 3.0).unwrap());
        assert!(!cond.modify(Operator::In, 1.0).unwrap());
        assert_eq!(cond.values(), vec![1.0, 3.0]);
        assert_eq!(cond.to_string(), "x[0] in { 1, 3 }");
    }


    #[test]
    fn modify_with_other_column_fails() {
        let mut cond = Condition::le("x", 0, 1.0);
        let other = Condition::le("y", 1, 0.0);
        assert!(matches!(
            cond.modify_with(&other),
            Err(RuleError::ColumnMismatch { expected: 0, got: 1 })
        ));
    }


    #[test]
    fn display() {
        assert_eq!(Condition::le("x", 0, 2.5).to_string(), "x[0] <= 2.5");
        assert_eq!(Condition::ge("y", 1, 1.0).to_string(), "y[1] >= 1");
        assert_eq!(
            Condition::range("z", 2, 1.0, 3.0).unwrap().to_string(),
            "z[2] range [1, 3]"
        );
    }
}

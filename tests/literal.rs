use minirules::prelude::*;
use minirules::LearnerCore;


/// Tests for growing and pruning a single rule.
#[cfg(test)]
pub mod literal_tests {
    use super::*;

    fn core() -> LearnerCore {
        LearnerCore::new(
            LearnerConfig::default().seed(0),
            PruningMetric::IrepDefault,
        )
    }


    #[test]
    fn tie_keeps_less_equal() {
        let core = core();
        let x = vec![vec![0.0, 1.0, 2.0]];
        let names = vec!["x".to_string()];

        // `x <= 1` and `x >= 1` both keep one positive and one negative.
        let cond = core.find_literal(&x, &names, &[1], &[0, 2]).unwrap();
        assert_eq!(cond.operator(), Operator::Le);
        assert_eq!(cond.values(), vec![1.0]);

        let again = core.find_literal(&x, &names, &[1], &[0, 2]).unwrap();
        assert_eq!(cond, again);
    }


    #[test]
    fn best_threshold_separates() {
        let core = core();
        let x = vec![(1..=6).map(f64::from).collect::<Vec<_>>()];
        let names = vec!["x".to_string()];

        let cond = core.find_literal(&x, &names, &[3, 4, 5], &[0, 1, 2])
            .unwrap();
        assert_eq!(cond.operator(), Operator::Ge);
        assert_eq!(cond.values(), vec![4.0]);

        assert!(core.find_literal(&x, &names, &[], &[0, 1]).is_none());
    }


    #[test]
    fn grow_extends_the_given_rule() {
        let core = core();
        let x = vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
        ];
        let names = vec!["a".to_string(), "b".to_string()];

        let mut start = Rule::new();
        start.add_cond(Condition::ge("a", 0, 1.0)).unwrap();

        let rule = core
            .grow_rule_from(start, &x, &names, &[2, 3], &[0, 1])
            .unwrap();
        assert_eq!(rule.len(), 2);
        assert_eq!(rule.learned_order(), &[0, 1]);
        assert_eq!(rule.covered_indices(&x, &[0, 1, 2, 3]), vec![2, 3]);
    }


    #[test]
    fn prune_stops_at_first_worse_removal() {
        let core = core();
        let x = vec![
            vec![1.0, 1.0, 1.0, 1.0, 0.0],
            vec![1.0, 1.0, 1.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0, 0.0],
        ];

        let mut rule = Rule::new();
        rule.add_cond(Condition::ge("a", 0, 1.0)).unwrap();
        rule.add_cond(Condition::ge("b", 1, 1.0)).unwrap();
        rule.add_cond(Condition::ge("c", 2, 1.0)).unwrap();

        // Dropping `c` scores 1.0 against 0.6, dropping `b` then 0.8.
        let pruned = core.prune_rule(&rule, &x, &[0, 1, 2], &[3, 4]);
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned.learned_order(), &[0, 1]);
        assert!(pruned.get(2).is_none());
    }


    #[test]
    fn prune_keeps_a_single_condition() {
        let core = core();
        let x = vec![
            vec![1.0, 1.0, 1.0, 1.0, 0.0],
            vec![1.0, 1.0, 1.0, 0.0, 0.0],
        ];

        // Scores 0, the empty rule would score 0.6.
        let mut rule = Rule::new();
        rule.add_cond(Condition::le("b", 1, 0.0)).unwrap();

        let pruned = core.prune_rule(&rule, &x, &[0, 1, 2], &[3, 4]);
        assert_eq!(pruned, rule);
    }
}

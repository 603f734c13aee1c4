use minirules::prelude::*;
use minirules::LearnerCore;
use minirules::learner::description_length::*;


/// Tests for the description length of rulesets.
#[cfg(test)]
pub mod description_length_tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn data() -> (Vec<Vec<f64>>, Vec<usize>) {
        let x = vec![(1..=8).map(f64::from).collect::<Vec<_>>()];
        let y = vec![0, 0, 0, 0, 1, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn rule_bits_boundaries() {
        assert_eq!(rule_bits(0, 8), 0.0);
        assert_eq!(rule_bits(0, 0), 0.0);
        assert!((rule_bits(8, 8) - 1.5).abs() < TOLERANCE);
        assert!((rule_bits(16, 8) - 2.0).abs() < TOLERANCE);
        assert!(rule_bits(1, 8) > 0.0);
    }


    #[test]
    fn exception_bits_of_perfect_split() {
        let matrix = ConfusionMatrix::new(4, 0, 0, 4);
        assert!((exception_bits(&matrix) - 2.0).abs() < TOLERANCE);
    }


    #[test]
    fn perfect_rule() {
        let (x, y) = data();
        let mut rule = Rule::with_prediction(1, true);
        rule.add_cond(Condition::ge("x", 0, 5.0)).unwrap();
        let ruleset = Ruleset::from(vec![rule]);

        let n = unique_conditions(&x);
        assert_eq!(n, 8);
        let dl = LearnerCore::total_description_length(&x, &ruleset, &y, 1, n)
            .unwrap();
        assert!((dl - (rule_bits(1, 8) + 2.0)).abs() < TOLERANCE);

        let empty = LearnerCore::total_description_length(&x, &Ruleset::new(), &y, 1, n)
            .unwrap();
        let expected = 1.0 + stirling_log_binomial(8, 4);
        assert!((empty - expected).abs() < TOLERANCE);
        assert!(dl < empty);
    }


    #[test]
    fn coverage_diff() {
        let (x, _) = data();
        let mut rule = Rule::with_prediction(1, true);
        rule.add_cond(Condition::ge("x", 0, 4.0)).unwrap();
        let ruleset = Ruleset::from(vec![rule]);

        // {0, ..., 5} \ {0, 1} = {2, 3, 4, 5}; the rule covers {3, 4, 5}.
        let diff = LearnerCore::ruleset_coverage_diff(
            &x, &ruleset, &[0, 1, 2, 3, 4, 5], &[0, 1],
        );
        assert_eq!(diff, 1);

        let diff = LearnerCore::ruleset_coverage_diff(&x, &ruleset, &[1], &[1, 2]);
        assert_eq!(diff, 0);
    }


    #[test]
    fn unique_conditions_counts_every_column() {
        let x = vec![
            vec![0.0, 0.0, 1.0],
            vec![2.0, 3.0, 4.0],
        ];
        assert_eq!(unique_conditions(&x), 5);
    }
}

use std::rc::Rc;
use minirules::prelude::*;


/// Tests for `Irep`.
#[cfg(test)]
pub mod irep_tests {
    use super::*;

    fn toy() -> (Vec<Vec<f64>>, Vec<usize>, Vec<String>) {
        let x = vec![
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0],
        ];
        let y = vec![0, 0, 1, 1];
        let names = vec!["a".to_string(), "b".to_string()];
        (x, y, names)
    }


    #[test]
    fn single_rule_on_toy_data() {
        let (x, y, names) = toy();
        for seed in 0..8 {
            let mut learner = Irep::init().seed(seed);
            let ruleset = learner.fit(&x, &y, &names, 1).unwrap();

            assert_eq!(ruleset.len(), 1);
            assert_eq!(ruleset.covered_indices(&x, &[0, 1, 2, 3]), vec![2, 3]);

            let predictions = learner.predict(&ruleset, &x, 1).unwrap();
            assert_eq!(measure_accuracy(&y, &predictions).unwrap(), 1.0);
        }
    }


    #[test]
    fn rules_predict_the_positive_class() {
        let (x, y, names) = toy();
        let y = y.iter().map(|&label| 1 - label).collect::<Vec<_>>();
        let mut learner = Irep::init().seed(3);
        let ruleset = learner.fit(&x, &y, &names, 1).unwrap();

        assert!(!ruleset.is_empty());
        for rule in &ruleset {
            assert!(rule.predicts_class(1).unwrap());
        }
        let predictions = learner.predict(&ruleset, &x, 1).unwrap();
        assert_eq!(predictions, y);
    }


    #[test]
    fn no_positive_gives_empty_ruleset() {
        let (x, _, names) = toy();
        let mut learner = Irep::init().seed(0);
        let ruleset = learner.fit(&x, &[0, 0, 0, 0], &names, 1).unwrap();
        assert!(ruleset.is_empty());

        let predictions = learner.predict(&ruleset, &x, 1).unwrap();
        assert_eq!(predictions, vec![0, 0, 0, 0]);
    }


    #[test]
    fn seeded_fits_are_reproducible() {
        let x = vec![
            (0..30).map(|i| (i % 7) as f64).collect::<Vec<_>>(),
            (0..30).map(|i| (i * 3 % 11) as f64).collect::<Vec<_>>(),
        ];
        let y = (0..30).map(|i| usize::from(i % 7 >= 4)).collect::<Vec<_>>();
        let names = vec!["p".to_string(), "q".to_string()];

        let a = Irep::init().seed(99).fit(&x, &y, &names, 1).unwrap();
        let b = Irep::init().seed(99).fit(&x, &y, &names, 1).unwrap();
        assert_eq!(a, b);
    }


    #[test]
    fn logger_receives_events() {
        let (x, y, names) = toy();
        let logger = Rc::new(MemoryLogger::new());
        let mut learner = Irep::init()
            .seed(5)
            .logger(Rc::clone(&logger));
        learner.fit(&x, &y, &names, 1).unwrap();

        assert!(logger.contains("FIT: Pos: 2, Neg: 2 remaining."));
        assert!(logger.contains("GROW: Found condition: a[0] >= 1"));
        assert!(logger.contains("FIT: IREP finished with 1 rules"));
    }


    #[test]
    fn invalid_input() {
        let (x, y, names) = toy();
        let mut learner = Irep::init();

        assert!(matches!(
            learner.fit(&[], &[], &[], 1),
            Err(RuleError::EmptyInput)
        ));
        assert!(matches!(
            learner.fit(&x, &y[..3], &names, 1),
            Err(RuleError::SampleCountMismatch { .. })
        ));
        assert!(matches!(
            learner.fit(&x, &y, &names[..1], 1),
            Err(RuleError::FeatureNamesMismatch { .. })
        ));

        let mut learner = Irep::init().split_ratio(0.0);
        assert!(matches!(
            learner.fit(&x, &y, &names, 1),
            Err(RuleError::InvalidSplitRatio(_))
        ));
    }


    #[test]
    fn new_validates_config() {
        let config = LearnerConfig::default().split_ratio(f64::NAN);
        assert!(Irep::new(config).is_err());

        let config = LearnerConfig::default().seed(1).prune_rules(false);
        let learner = Irep::new(config).unwrap();
        assert_eq!(learner.name(), "IREP");
        assert_eq!(learner.core().random_state(), 1);
    }
}

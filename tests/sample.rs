use std::env;
use std::fs;
use minirules::prelude::*;


/// Tests for reading samples.
#[cfg(test)]
pub mod sample_tests {
    use super::*;

    #[test]
    fn read_csv_and_fit() {
        let mut path = env::temp_dir();
        path.push(format!("minirules-sample-{}.csv", std::process::id()));
        fs::write(&path, "x,class\n1,0\n2,0\n3,0\n6,1\n7,1\n8,1\n").unwrap();

        let sample = SampleReader::default()
            .file(&path)
            .has_header(true)
            .target_feature("class")
            .read()
            .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(sample.shape(), (6, 1));
        assert_eq!(sample.feature_names(), ["x"]);

        let mut learner = OneR::init();
        let ruleset = learner.fit_sample(&sample, 1).unwrap();
        let predictions = learner.predict(&ruleset, sample.data(), 1).unwrap();
        assert_eq!(measure_accuracy(sample.target(), &predictions).unwrap(), 1.0);
    }


    #[test]
    fn reader_needs_file_and_target() {
        let result = SampleReader::<&str, &str>::new()
            .target_feature("class")
            .read();
        assert!(matches!(result, Err(RuleError::InvalidSample(_))));

        let result = SampleReader::<&str, &str>::new()
            .file("data.csv")
            .read();
        assert!(matches!(result, Err(RuleError::InvalidSample(_))));
    }


    #[test]
    fn missing_file() {
        let result = Sample::from_csv("/nonexistent/minirules.csv", true);
        assert!(matches!(result, Err(RuleError::Io { .. })));
    }
}

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::{Result, RuleError};


/// Struct `Sample` holds the feature columns, their names,
/// and the class labels.
/// 
/// The data is column-major: `data()[feature][sample]`,
/// the layout every learner consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub(super) names: Vec<String>,
    pub(super) data: Vec<Vec<f64>>,
    pub(super) target: Vec<usize>,
}


impl Sample {
    /// Construct a `Sample` from column-major `data` and `target`.
    /// Fails if the columns are ragged,
    /// if `names` does not name every column,
    /// or if `target` does not label every sample.
    pub fn new(
        data: Vec<Vec<f64>>,
        names: Vec<String>,
        target: Vec<usize>,
    ) -> Result<Self>
    {
        if names.len() != data.len() {
            return Err(RuleError::FeatureNamesMismatch {
                columns: data.len(),
                names: names.len(),
            });
        }
        let n_sample = data.first().map_or(target.len(), Vec::len);
        if let Some((column, col)) = data.iter()
            .enumerate()
            .find(|(_, col)| col.len() != n_sample)
        {
            return Err(RuleError::RaggedFeature {
                column,
                expected: n_sample,
                got: col.len(),
            });
        }
        if target.len() != n_sample {
            return Err(RuleError::SampleCountMismatch {
                features: n_sample,
                labels: target.len(),
            });
        }
        Ok(Self { names, data, target })
    }


    /// Read a CSV format file to `Sample` type.
    /// The target column is not set yet,
    /// call [`Sample::set_target`] afterwards.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        let path = file.as_ref();
        let file = File::open(path)
            .map_err(|source| RuleError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_reader(file, has_header)
    }


    /// Read CSV text to `Sample` type.
    /// Without a header row, the columns are named `Feat. [1]`, `Feat. [2]`, ...
    pub fn from_reader<R: Read>(reader: R, has_header: bool) -> Result<Self> {
        let mut lines = BufReader::new(reader).lines();

        let mut names = Vec::new();
        if has_header {
            let line = lines.next()
                .ok_or(RuleError::InvalidSample("missing header row".into()))??;
            names = line.split(',')
                .map(|name| name.trim().to_string())
                .collect::<Vec<_>>();
        }

        let mut data: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
        let mut n_sample = 0_usize;
        for (row, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let values = line.split(',')
                .map(|x| {
                    let x = x.trim();
                    x.parse::<f64>()
                        .map_err(|_| RuleError::InvalidSample(
                            format!("cannot parse `{x}` at row {row}")
                        ))
                })
                .collect::<Result<Vec<_>>>()?;

            // The first row fixes the number of columns.
            if names.is_empty() {
                names = (1..=values.len())
                    .map(|i| format!("Feat. [{i}]"))
                    .collect();
                data = vec![Vec::new(); names.len()];
            }
            if values.len() != names.len() {
                return Err(RuleError::InvalidSample(format!(
                    "row {row} has {} values, expected {}",
                    values.len(), names.len()
                )));
            }

            for (column, value) in data.iter_mut().zip(values) {
                column.push(value);
            }
            n_sample += 1;
        }

        if n_sample == 0 {
            return Err(RuleError::EmptyInput);
        }

        Ok(Self { names, data, target: Vec::new() })
    }


    /// Moves the feature named `target` to the class labels.
    /// Every value of the column must be a non-negative integer.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.names.iter()
            .position(|name| name == target)
            .ok_or_else(|| RuleError::InvalidSample(
                format!("the target column `{target}` does not exist")
            ))?;

        let labels = self.data[pos].iter()
            .map(|&y| {
                if y >= 0.0 && y.fract() == 0.0 && y <= usize::MAX as f64 {
                    Ok(y as usize)
                } else {
                    Err(RuleError::InvalidSample(
                        format!("`{y}` is not a class id")
                    ))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        self.names.remove(pos);
        self.data.remove(pos);
        self.target = labels;
        Ok(self)
    }


    /// Returns the feature columns.
    pub fn data(&self) -> &[Vec<f64>] {
        &self.data[..]
    }


    /// Returns the class labels.
    pub fn target(&self) -> &[usize] {
        &self.target[..]
    }


    /// Returns the feature names.
    pub fn feature_names(&self) -> &[String] {
        &self.names[..]
    }


    /// Returns the pair of the number of samples and features.
    pub fn shape(&self) -> (usize, usize) {
        let n_sample = self.data.first()
            .map_or(self.target.len(), Vec::len);
        (n_sample, self.data.len())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "a,b,class\n0,1.5,1\n2,3,0\n4,-1,1\n";

    #[test]
    fn read_with_header() {
        let sample = Sample::from_reader(CSV.as_bytes(), true)
            .unwrap()
            .set_target("class")
            .unwrap();

        assert_eq!(sample.shape(), (3, 2));
        assert_eq!(sample.feature_names(), ["a", "b"]);
        assert_eq!(sample.data()[1], vec![1.5, 3.0, -1.0]);
        assert_eq!(sample.target(), [1, 0, 1]);
    }

    #[test]
    fn read_without_header() {
        let sample = Sample::from_reader("1,2\n3,4\n".as_bytes(), false)
            .unwrap();
        assert_eq!(sample.feature_names(), ["Feat. [1]", "Feat. [2]"]);
        assert_eq!(sample.data(), [vec![1.0, 3.0], vec![2.0, 4.0]]);
    }

    #[test]
    fn target_must_be_class_ids() {
        let csv = "a,class\n0,1\n1,0.5\n";
        let result = Sample::from_reader(csv.as_bytes(), true)
            .unwrap()
            .set_target("class");
        assert!(matches!(result, Err(RuleError::InvalidSample(_))));

        let result = Sample::from_reader(CSV.as_bytes(), true)
            .unwrap()
            .set_target("label");
        assert!(matches!(result, Err(RuleError::InvalidSample(_))));
    }

    #[test]
    fn malformed_rows() {
        let result = Sample::from_reader("a,b\n1,2\n3\n".as_bytes(), true);
        assert!(matches!(result, Err(RuleError::InvalidSample(_))));

        let result = Sample::from_reader("a,b\n1,x\n".as_bytes(), true);
        assert!(matches!(result, Err(RuleError::InvalidSample(_))));

        let result = Sample::from_reader("a,b\n".as_bytes(), true);
        assert!(matches!(result, Err(RuleError::EmptyInput)));
    }

    #[test]
    fn new_checks_shape() {
        let names = vec!["a".to_string()];
        assert!(Sample::new(vec![vec![0.0, 1.0]], names.clone(), vec![0, 1]).is_ok());
        assert!(matches!(
            Sample::new(vec![vec![0.0, 1.0]], names, vec![0]),
            Err(RuleError::SampleCountMismatch { features: 2, labels: 1 })
        ));
    }
}

use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use fixedbitset::FixedBitSet;
use polars::prelude::*;
use rand::prelude::*;

use crate::{ForestError, Result};
use super::attribute::{Attribute, AttributeId, AttributeKind};
use super::feature::{Column, Feature};
use super::histogram::ClassHistogram;


/// Struct `Sample` holds a batch of examples:
/// a set of feature columns and one categorical target (class) column.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) id_to_index: HashMap<AttributeId, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Feature,
    pub(super) n_sample: usize,
}


impl Sample {
    /// Construct a new sample from feature columns and a target column.
    /// All columns must have the same length
    /// and the target must be categorical.
    pub fn new(features: Vec<Feature>, target: Feature) -> Result<Self> {
        if !target.attribute().is_categorical() {
            return Err(ForestError::NonCategoricalTarget {
                name: target.name().to_string(),
            });
        }

        let n_sample = target.len();
        for feature in features.iter() {
            if feature.len() != n_sample {
                return Err(ForestError::LengthMismatch {
                    name: feature.name().to_string(),
                    expected: n_sample,
                    got: feature.len(),
                });
            }
        }

        let id_to_index = index_of(&features);
        Ok(Self { id_to_index, features, target, n_sample, })
    }


    /// Convert `polars::DataFrame` into `Sample`.
    /// The column named `target` becomes the class column;
    /// string columns become categorical features and
    /// numeric columns become numeric features.
    pub fn from_dataframe<S: AsRef<str>>(data: DataFrame, target: S)
        -> Result<Self>
    {
        let target = target.as_ref();
        if data.column(target).is_err() {
            return Err(ForestError::UnknownColumn { name: target.to_string() });
        }

        let mut features = Vec::with_capacity(data.width());
        let mut label = None;
        for series in data.get_columns() {
            let name = series.name();
            if name == target {
                let values = series.cast(&DataType::Utf8)?;
                label = Some(Feature::categorical(name, utf8_values(&values)?));
                continue;
            }
            let feature = match series.dtype() {
                DataType::Utf8 => {
                    Feature::categorical(name, utf8_values(series)?)
                },
                _ => {
                    let values = series.cast(&DataType::Float64)?;
                    let values = values.f64()?
                        .into_iter()
                        .enumerate()
                        .map(|(i, v)| v.ok_or_else(|| null_at(name, i)))
                        .collect::<Result<Vec<_>>>()?;
                    Feature::numeric(name, values)
                },
            };
            features.push(feature);
        }

        let label = label.ok_or_else(|| {
            ForestError::UnknownColumn { name: target.to_string() }
        })?;
        Self::new(features, label)
    }


    /// Read a CSV format file to [`Sample`] type.
    /// Every column is read as a categorical column.
    pub fn from_csv<P, S>(file: P, has_header: bool, target: S)
        -> Result<Self>
        where P: AsRef<Path>,
              S: AsRef<str>,
    {
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, has_header, target, None)
    }


    /// Read a CSV from [`BufReader`].
    ///
    /// If the CSV has no header row,
    /// each column is named `Feat. [1]`, `Feat. [2]`, ...
    ///
    /// If `schema` is given, the columns are bound by name
    /// to the attributes of `schema`, so that trees grown on `schema`
    /// recognize the columns of the returned sample.
    /// Columns unknown to `schema` get fresh categorical attributes.
    pub fn from_reader<R, S>(
        reader: BufReader<R>,
        has_header: bool,
        target: S,
        schema: Option<&Sample>,
    ) -> Result<Self>
        where R: Read,
              S: AsRef<str>,
    {
        let target = target.as_ref();
        let mut lines = reader.lines()
            .enumerate()
            .map(|(i, line)| line.map(|l| (i + 1, l)));

        let mut columns: Option<Vec<Feature>> = None;
        if has_header {
            if let Some(line) = lines.next() {
                let (_, line) = line?;
                let names = line.split(',')
                    .map(|name| name.trim())
                    .collect::<Vec<_>>();
                columns = Some(empty_columns(&names, schema));
            }
        }

        for line in lines {
            let (no, line) = line?;
            if line.trim().is_empty() { continue; }

            let values = line.split(',')
                .map(|x| x.trim())
                .collect::<Vec<_>>();

            // if the header does not exist,
            // construct a dummy header.
            let columns = columns.get_or_insert_with(|| {
                let names = (1..=values.len())
                    .map(|i| format!("Feat. [{i}]"))
                    .collect::<Vec<_>>();
                let names = names.iter().map(|s| s.as_str()).collect::<Vec<_>>();
                empty_columns(&names, schema)
            });

            if values.len() != columns.len() {
                return Err(ForestError::Parse {
                    line: no,
                    reason: format!(
                        "expected {} values, got {}",
                        columns.len(), values.len()
                    ),
                });
            }

            for (column, value) in columns.iter_mut().zip(values) {
                column.push_raw(value, no)?;
            }
        }

        let mut features = columns.unwrap_or_default();
        let pos = features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| {
                ForestError::UnknownColumn { name: target.to_string() }
            })?;
        let target = features.remove(pos);

        Self::new(features, target)
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.features.len())
    }


    /// Returns a slice of the features.
    #[inline]
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the `i`-th feature.
    #[inline]
    pub fn feature(&self, i: usize) -> &Feature {
        &self.features[i]
    }


    /// Returns the target (class) column.
    #[inline]
    pub fn target(&self) -> &Feature {
        &self.target
    }


    /// Returns the class attribute.
    #[inline]
    pub fn class_attribute(&self) -> &Attribute {
        self.target.attribute()
    }


    /// Resolves `attribute` to a column index.
    /// Attributes are matched by identity, not by name.
    #[inline]
    pub fn attribute_index(&self, attribute: &Attribute) -> Option<usize> {
        self.id_to_index.get(&attribute.id()).copied()
    }


    /// Finds a column index by name.
    pub fn column_index<S: AsRef<str>>(&self, name: S) -> Option<usize> {
        let name = name.as_ref();
        self.features.iter().position(|feat| feat.name() == name)
    }


    /// Returns the class label of the `row`-th example.
    #[inline]
    pub fn label(&self, row: usize) -> std::borrow::Cow<'_, str> {
        self.target.value_string(row)
    }


    /// Returns every class label in row order.
    pub fn labels(&self) -> Vec<String> {
        (0..self.n_sample)
            .map(|row| self.label(row).into_owned())
            .collect()
    }


    /// Overwrites the class label of the `row`-th example.
    pub fn set_label<S: AsRef<str>>(&mut self, row: usize, label: S)
        -> Result<()>
    {
        if row >= self.n_sample {
            return Err(ForestError::contract(format!(
                "row {row} is out of range for a sample of {} rows",
                self.n_sample
            )));
        }
        self.target.set_category(row, label.as_ref())
    }


    /// Counts the class labels over `rows`.
    pub fn class_histogram(&self, rows: &[usize]) -> ClassHistogram {
        rows.iter()
            .map(|&row| self.target.value_string(row))
            .collect()
    }


    /// Groups `rows` by the category they take on `attribute`.
    /// Every row lands in exactly one group
    /// and no group is empty.
    pub fn decompose(&self, attribute: &Attribute, rows: &[usize])
        -> Result<BTreeMap<String, Vec<usize>>>
    {
        let k = self.attribute_index(attribute)
            .ok_or_else(|| ForestError::contract(format!(
                "attribute `{}` is not a column of this sample",
                attribute.name()
            )))?;
        let feature = &self.features[k];

        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for &row in rows {
            let value = feature.value_string(row);
            match groups.get_mut(value.as_ref()) {
                Some(group) => { group.push(row); },
                None => { groups.insert(value.into_owned(), vec![row]); },
            }
        }
        Ok(groups)
    }


    /// Returns a new sample made of the given rows.
    /// A row may appear more than once (bootstrap sampling).
    /// Attribute identities are preserved.
    pub fn subsample(&self, rows: &[usize]) -> Self {
        let features = self.features.iter()
            .map(|feat| feat.select(rows))
            .collect::<Vec<_>>();
        let target = self.target.select(rows);

        Self {
            id_to_index: self.id_to_index.clone(),
            features,
            target,
            n_sample: rows.len(),
        }
    }


    /// Returns a new sample that keeps the features
    /// whose indices are set in `mask`, in column order.
    pub fn select_features(&self, mask: &FixedBitSet) -> Self {
        let features = mask.ones()
            .filter(|&k| k < self.features.len())
            .map(|k| self.features[k].clone())
            .collect::<Vec<_>>();
        let id_to_index = index_of(&features);

        Self {
            id_to_index,
            features,
            target: self.target.clone(),
            n_sample: self.n_sample,
        }
    }


    /// Randomly splits `self` into a training and a validation sample.
    /// The validation sample receives `⌊ratio · n⌋` rows.
    pub fn train_validation_split(&self, ratio: f64, seed: u64)
        -> (Sample, Sample)
    {
        let mut ix = (0..self.n_sample).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(seed);
        ix.shuffle(&mut rng);

        let n_validation = ((self.n_sample as f64) * ratio).floor() as usize;
        let n_validation = n_validation.min(self.n_sample);
        self.split(&ix, 0, n_validation)
    }


    /// Split `self` into two samples.
    /// The rows `ix[start..end]` form the second sample,
    /// the remaining rows of `ix` form the first one.
    pub fn split<T>(&self, ix: T, start: usize, end: usize)
        -> (Sample, Sample)
        where T: AsRef<[usize]>
    {
        let ix = ix.as_ref();
        let end = end.min(ix.len());
        let start = start.min(end);

        let mut train = self.empty_like(ix.len() - (end - start));
        let mut test = self.empty_like(end - start);

        for (i, &row) in ix.iter().enumerate() {
            if (start..end).contains(&i) {
                test.append_from(self, row);
            } else {
                train.append_from(self, row);
            }
        }

        (train, test)
    }


    fn empty_like(&self, capacity: usize) -> Self {
        Self {
            id_to_index: self.id_to_index.clone(),
            features: self.features.iter()
                .map(|feat| feat.empty_like(capacity))
                .collect(),
            target: self.target.empty_like(capacity),
            n_sample: 0,
        }
    }


    fn append_from(&mut self, other: &Self, row: usize) {
        self.features.iter_mut()
            .zip(&other.features)
            .for_each(|(to, from)| to.push_from(from, row));
        self.target.push_from(&other.target, row);
        self.n_sample += 1;
    }
}


fn index_of(features: &[Feature]) -> HashMap<AttributeId, usize> {
    features.iter()
        .enumerate()
        .map(|(i, feat)| (feat.attribute().id(), i))
        .collect()
}


/// Construct empty columns named `names`.
/// Names known to `schema` reuse its attributes.
fn empty_columns(names: &[&str], schema: Option<&Sample>) -> Vec<Feature> {
    names.iter()
        .map(|&name| {
            let known = schema.and_then(|schema| {
                if schema.target.name() == name {
                    return Some(schema.target.attribute());
                }
                schema.column_index(name)
                    .map(|k| schema.features[k].attribute())
            });
            match known {
                Some(attribute) => {
                    let column = match attribute.kind() {
                        AttributeKind::Categorical => Column::Categorical(Vec::new()),
                        AttributeKind::Numeric { .. } => Column::Numeric(Vec::new()),
                    };
                    Feature { attribute: attribute.clone(), column }
                },
                None => Feature::categorical(name, Vec::<String>::new()),
            }
        })
        .collect()
}


fn utf8_values(series: &Series) -> Result<Vec<String>> {
    let name = series.name();
    series.utf8()?
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.map(|v| v.to_string()).ok_or_else(|| null_at(name, i))
        })
        .collect()
}


fn null_at(name: &str, row: usize) -> ForestError {
    ForestError::Parse {
        line: row + 1,
        reason: format!("column `{name}` has a missing value"),
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;

    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = self.column_index(name)
            .unwrap_or_else(|| panic!("The feature named `{name}` does not exist"));
        &self.features[k]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn training_examples(bytes: &[u8], has_header: bool) -> Sample {
        let reader = BufReader::new(bytes);
        Sample::from_reader(reader, has_header, "class", None)
            .unwrap()
    }


    fn tennis() -> Sample {
        let bytes = b"\
            outlook,windy,class\n\
            sunny,false,no\n\
            sunny,true,no\n\
            overcast,false,yes\n\
            rainy,false,yes\n\
            rainy,true,no\n";
        training_examples(bytes, true)
    }


    #[test]
    fn test_from_reader_01() {
        let sample = tennis();
        assert_eq!(sample.shape(), (5, 2));
        assert_eq!(sample.label(2), "yes");
        assert_eq!(sample["outlook"].value_string(4), "rainy");
    }


    #[test]
    fn test_from_reader_without_header() {
        let bytes = b"a,x\nb,y\n";
        let reader = BufReader::new(&bytes[..]);
        let sample = Sample::from_reader(reader, false, "Feat. [2]", None)
            .unwrap();
        assert_eq!(sample.shape(), (2, 1));
        assert_eq!(sample.label(1), "y");
    }


    #[test]
    fn ragged_rows_are_rejected() {
        let bytes = b"a,class\nx,1\ny\n";
        let reader = BufReader::new(&bytes[..]);
        let err = Sample::from_reader(reader, true, "class", None);
        assert!(matches!(err, Err(ForestError::Parse { line: 3, .. })));
    }


    #[test]
    fn decompose_groups_every_row_once() {
        let sample = tennis();
        let outlook = sample["outlook"].attribute().clone();
        let groups = sample.decompose(&outlook, &[0, 1, 2, 3, 4]).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups["sunny"], vec![0, 1]);
        assert_eq!(groups["overcast"], vec![2]);
        assert_eq!(groups["rainy"], vec![3, 4]);
    }


    #[test]
    fn decompose_skips_values_without_rows() {
        let sample = tennis();
        let outlook = sample["outlook"].attribute().clone();
        let groups = sample.decompose(&outlook, &[0, 3]).unwrap();
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["rainy", "sunny"]);
    }


    #[test]
    fn decompose_rejects_foreign_attributes() {
        let sample = tennis();
        let foreign = Attribute::categorical("outlook");
        assert!(sample.attribute_index(&foreign).is_none());
        assert!(matches!(
            sample.decompose(&foreign, &[0]),
            Err(ForestError::ContractViolation { .. })
        ));
    }


    #[test]
    fn split_keeps_identity_and_sizes() {
        let sample = tennis();
        let (train, validation) = sample.train_validation_split(0.4, 7);
        assert_eq!(train.shape(), (3, 2));
        assert_eq!(validation.shape(), (2, 2));

        let outlook = sample["outlook"].attribute();
        assert_eq!(train.attribute_index(outlook), Some(0));
        assert_eq!(validation.attribute_index(outlook), Some(0));
    }


    #[test]
    fn select_features_reindexes_columns() {
        let sample = tennis();
        let mut mask = FixedBitSet::with_capacity(2);
        mask.insert(1);
        let sub = sample.select_features(&mask);

        assert_eq!(sub.shape(), (5, 1));
        assert_eq!(sub.attribute_index(sample["windy"].attribute()), Some(0));
        assert_eq!(sub.attribute_index(sample["outlook"].attribute()), None);
    }


    #[test]
    fn schema_binds_columns_by_name() {
        let sample = tennis();
        let bytes = b"windy,outlook,class\ntrue,sunny,no\n";
        let reader = BufReader::new(&bytes[..]);
        let test = Sample::from_reader(reader, true, "class", Some(&sample))
            .unwrap();

        let outlook = sample["outlook"].attribute();
        assert_eq!(test.attribute_index(outlook), Some(1));
        assert_eq!(test.class_attribute(), sample.class_attribute());
    }


    #[test]
    fn set_label_writes_back() {
        let mut sample = tennis();
        sample.set_label(0, "yes").unwrap();
        assert_eq!(sample.label(0), "yes");
        assert!(sample.set_label(10, "yes").is_err());
    }


    #[test]
    fn from_dataframe_reads_string_and_numeric_columns() {
        let color = Series::new("color", &["red", "blue", "red"]);
        let size = Series::new("size", &[1.0, 2.0, 1.0]);
        let class = Series::new("class", &["a", "b", "a"]);
        let df = DataFrame::new(vec![color, size, class]).unwrap();

        let sample = Sample::from_dataframe(df, "class").unwrap();
        assert_eq!(sample.shape(), (3, 2));
        assert_eq!(sample["size"].value_string(1), "2.00");
        assert_eq!(sample.label(1), "b");
    }
}

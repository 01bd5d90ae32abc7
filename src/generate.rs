//! Generated sort cases: small basics, edge cases, large random and
//! ordered inputs, and numeric corner cases.
//!
//! Expected outputs come from the comparator fallback, never from the
//! fast paths they are meant to check.

use crate::dataset::{save_values, DESCRIPTION_FILE, EXPECTED_FILE, INPUT_FILE};
use crate::error::{SortContext, SortResult};
use crate::fallback::{ComparatorFallback, FallbackSort};
use crate::value::Value;
use rand::Rng;
use std::fs;
use std::path::Path;

/// One named case with its expected result.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub description: String,
    pub input: Vec<Value>,
    pub expected: Vec<Value>,
}

impl TestCase {
    pub fn new(name: &str, description: &str, input: Vec<Value>) -> Self {
        let mut expected = input.clone();
        ComparatorFallback.sort_values(&mut expected);
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input,
            expected,
        }
    }
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

fn floats(values: &[f64]) -> Vec<Value> {
    values.iter().copied().map(Value::Float).collect()
}

fn strs(values: &[&str]) -> Vec<Value> {
    values.iter().copied().map(Value::from).collect()
}

pub fn basic_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("case1", "small positive integers", ints(&[5, 1, 4, 2, 8])),
        TestCase::new(
            "case2",
            "strings",
            strs(&["orange", "apple", "banana", "grape", "kiwi"]),
        ),
        TestCase::new("case3", "floats", floats(&[3.14, 1.41, 2.71, 1.73, 2.0])),
    ]
}

pub fn edge_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("case_edge1", "empty list", Vec::new()),
        TestCase::new("case_edge2", "single element", ints(&[1])),
        TestCase::new("case_edge3", "all elements equal", ints(&[2, 2, 2, 2, 2])),
    ]
}

/// Large inputs of `size` elements each.
pub fn large_cases<R: Rng>(size: usize, rng: &mut R) -> Vec<TestCase> {
    let random_ints: Vec<Value> = (0..size)
        .map(|_| Value::Int(rng.gen_range(-1_000_000_000..=1_000_000_000)))
        .collect();

    let random_words: Vec<Value> = (0..size)
        .map(|_| {
            let len = rng.gen_range(5..=15);
            let word: String = (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect();
            Value::Str(word)
        })
        .collect();

    let random_floats: Vec<Value> = (0..size)
        .map(|_| {
            let micros: i64 = rng.gen_range(-1_000_000_000..=1_000_000_000);
            Value::Float(micros as f64 / 1_000_000.0)
        })
        .collect();

    let ascending: Vec<Value> = (0..size as i64).map(Value::Int).collect();
    let descending: Vec<Value> = (0..size as i64).map(|i| Value::Int(size as i64 - i)).collect();

    vec![
        TestCase::new("case_large1", "random integers in [-1e9, 1e9]", random_ints),
        TestCase::new("case_large2", "random lowercase strings of 5-15 chars", random_words),
        TestCase::new("case_large3", "random floats in [-1000, 1000], 6 decimals", random_floats),
        TestCase::new("case_large4", "already sorted", ascending),
        TestCase::new("case_large5", "reverse sorted", descending),
    ]
}

pub fn special_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(
            "case_special1",
            "integer extremes",
            ints(&[0, 1_000_000_000, -1_000_000_000, 5, -5]),
        ),
        TestCase::new(
            "case_special2",
            "signed zeros, tiny and huge floats",
            floats(&[0.0, -0.0, 3.14, -3.14, 2.0e-10, 2.0e10]),
        ),
    ]
}

/// Every generated case, large ones sized `large_size`.
pub fn generate_cases<R: Rng>(large_size: usize, rng: &mut R) -> Vec<TestCase> {
    let mut cases = basic_cases();
    cases.extend(edge_cases());
    cases.extend(large_cases(large_size, rng));
    cases.extend(special_cases());
    cases
}

/// Write a case as `<root>/<name>/{description,input,expected}.txt`.
pub fn write_case(root: &Path, case: &TestCase) -> SortResult<()> {
    let dir = root.join(&case.name);
    let name = dir.display().to_string();
    fs::create_dir_all(&dir).with_file_context(&name)?;
    fs::write(dir.join(DESCRIPTION_FILE), format!("{}\n", case.description))
        .with_file_context(&name)?;
    save_values(&dir.join(INPUT_FILE), &case.input)?;
    save_values(&dir.join(EXPECTED_FILE), &case.expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_case;
    use crate::dispatch::sort;
    use crate::measure::verify;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    #[test]
    fn test_case_names_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let cases = generate_cases(10, &mut rng);
        assert_eq!(cases.len(), 13);
        let mut names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), cases.len());
    }

    #[test]
    fn test_fast_paths_agree_with_expected() {
        let mut rng = StdRng::seed_from_u64(42);
        for case in generate_cases(2_000, &mut rng) {
            let sorted = sort(&case.input).expect("sort failed");
            assert!(verify(&sorted, &case.expected).is_match(), "{}", case.name);
        }
    }

    #[test]
    fn test_written_case_round_trips() -> SortResult<()> {
        let root = TempDir::new()?;
        let case = special_cases().remove(1);
        write_case(root.path(), &case)?;

        let loaded = load_case(&root.path().join(&case.name))?;
        assert!(verify(&loaded.input, &case.input).is_match());
        assert!(verify(&loaded.expected, &case.expected).is_match());
        let description = fs::read_to_string(root.path().join(&case.name).join(DESCRIPTION_FILE))?;
        assert_eq!(description.trim(), case.description);
        Ok(())
    }
}

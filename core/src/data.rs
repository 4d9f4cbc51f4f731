use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{self, BufRead},
    num::ParseIntError,
    path::{Path, PathBuf},
};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::structs::{Dictionary, Word, WordError};

/// Layout of one line of a word list.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RecordFormat {
    /// `word`
    #[default]
    Plain,
    /// `word<TAB>score`
    Scored,
}

impl RecordFormat {
    fn fields(self) -> usize {
        match self {
            RecordFormat::Plain => 1,
            RecordFormat::Scored => 2,
        }
    }
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected {expected} field(s), found {found} in \"{record}\"")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
        record: String,
    },
    #[error("line {line}: {source}")]
    Word {
        line: usize,
        #[source]
        source: WordError,
    },
    #[error("line {line}: invalid score \"{field}\"")]
    Score {
        line: usize,
        field: String,
        #[source]
        source: ParseIntError,
    },
    #[error("no answers found")]
    Empty,
}

pub type Record = (Word, Option<u64>);

fn parse_record(line: usize, record: &str, format: RecordFormat) -> Result<Record, DataError> {
    let fields = record.split('\t').collect::<Vec<_>>();
    if fields.len() != format.fields() {
        return Err(DataError::FieldCount {
            line,
            expected: format.fields(),
            found: fields.len(),
            record: record.to_string(),
        });
    }

    let word = Word::try_from(fields[0]).map_err(|source| DataError::Word { line, source })?;
    let score = match format {
        RecordFormat::Plain => None,
        RecordFormat::Scored => Some(fields[1].parse().map_err(|source| DataError::Score {
            line,
            field: fields[1].to_string(),
            source,
        })?),
    };

    Ok((word, score))
}

/// Parses a word list, one record per line. Blank lines are skipped and
/// reported line numbers are 1-based.
pub fn parse_words<'a, I>(lines: I, format: RecordFormat) -> Result<Vec<Record>, DataError>
where
    I: Iterator<Item = &'a str>,
{
    lines
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.is_empty())
        .map(|(line, l)| parse_record(line, l, format))
        .collect()
}

pub fn load_words<P>(filename: P, format: RecordFormat) -> Result<Vec<Record>, DataError>
where
    P: AsRef<Path>,
{
    let path = filename.as_ref();
    let io_error = |source: io::Error| DataError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let lines = io::BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .map_err(io_error)?;

    parse_words(lines.iter().map(String::as_str), format)
}

/// Loads the answer list and, when given, the list of extra allowed guesses.
pub fn load_dictionary<P, Q>(
    answers: P,
    guesses: Option<Q>,
    format: RecordFormat,
) -> Result<Dictionary, DataError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let answers = load_words(answers, format)?;
    if answers.is_empty() {
        return Err(DataError::Empty);
    }
    let guesses = match guesses {
        Some(path) => load_words(path, format)?,
        None => Vec::new(),
    };

    let dictionary = Dictionary::with_scores(answers, guesses);
    info!(
        "Starting with a dictionary of {} answers and {} extra guesses",
        dictionary.answers_len(),
        dictionary.extra_guesses().len()
    );
    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::{env, fs};

    #[test]
    fn parses_plain_lists() {
        let words = parse_words("mount\ncount\r\n\nzyzzy\n".lines(), RecordFormat::Plain).unwrap();
        let words = words.iter().map(|(w, s)| (w.to_string(), *s)).collect::<Vec<_>>();
        assert_eq!(
            words,
            vec![
                ("mount".to_string(), None),
                ("count".to_string(), None),
                ("zyzzy".to_string(), None)
            ]
        );
    }

    #[test]
    fn parses_scored_lists() {
        let words = parse_words("mount\t120\nboobs\t0".lines(), RecordFormat::Scored).unwrap();
        assert_eq!(words[0].1, Some(120));
        assert_eq!(words[1].0.to_string(), "boobs");
    }

    #[rstest]
    #[case("mount\t12", RecordFormat::Plain, 1, 2)]
    #[case("mount", RecordFormat::Scored, 2, 1)]
    #[case("mount\t1\t2", RecordFormat::Scored, 2, 3)]
    fn rejects_wrong_field_count(
        #[case] input: &str,
        #[case] format: RecordFormat,
        #[case] expected: usize,
        #[case] found: usize,
    ) {
        let err = parse_words(input.lines(), format).unwrap_err();
        match err {
            DataError::FieldCount {
                line,
                expected: e,
                found: f,
                ..
            } => {
                assert_eq!(line, 1);
                assert_eq!((e, f), (expected, found));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn reports_line_of_bad_word() {
        let err = parse_words("mount\n\nmounts\n".lines(), RecordFormat::Plain).unwrap_err();
        assert!(matches!(err, DataError::Word { line: 3, .. }));
        assert_eq!(
            err.to_string(),
            "line 3: Expected word of length: 5. Found word \"mounts\" of length 6"
        );
    }

    #[test]
    fn reports_bad_score() {
        let err = parse_words("mount\tlots".lines(), RecordFormat::Scored).unwrap_err();
        assert!(matches!(err, DataError::Score { line: 1, .. }));
    }

    #[test]
    fn loads_dictionary_from_files() {
        let dir = env::temp_dir().join(format!("wordle-minimax-data-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let answers = dir.join("answers.txt");
        let guesses = dir.join("guesses.txt");
        fs::write(&answers, "mount\ncount\n").unwrap();
        fs::write(&guesses, "strew\nmount\n").unwrap();

        let dictionary = load_dictionary(&answers, Some(&guesses), RecordFormat::Plain).unwrap();
        assert_eq!(dictionary.answers(), 0..2);
        assert_eq!(dictionary.extra_guesses(), 2..3);

        fs::write(&answers, "").unwrap();
        assert!(matches!(
            load_dictionary(&answers, None::<&Path>, RecordFormat::Plain),
            Err(DataError::Empty)
        ));
        assert!(matches!(
            load_dictionary(dir.join("missing.txt"), None::<&Path>, RecordFormat::Plain),
            Err(DataError::Io { .. })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}

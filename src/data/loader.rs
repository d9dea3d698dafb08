use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Question, NUM_OPTIONS};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path}: question {index} has correct answer {answer}, expected 0..{NUM_OPTIONS}")]
    InvalidAnswer {
        path: PathBuf,
        index: usize,
        answer: usize,
    },
    #[error("{path}: question {index} reuses id {id}")]
    DuplicateId {
        path: PathBuf,
        index: usize,
        id: Uuid,
    },
    #[error("{0} must contain at least one question")]
    Empty(PathBuf),
}

/// Load a question list from a JSON array of
/// `{ text, options, correctAnswerIndex }` objects. Ids are optional in the
/// file and are generated when missing; ids that are present must be unique.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let questions: Vec<Question> =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if questions.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    if let Some((index, question)) = questions
        .iter()
        .enumerate()
        .find(|(_, q)| q.correct_answer >= NUM_OPTIONS)
    {
        return Err(LoadError::InvalidAnswer {
            path: path.to_path_buf(),
            index,
            answer: question.correct_answer,
        });
    }

    let mut seen = HashSet::with_capacity(questions.len());
    if let Some((index, question)) = questions
        .iter()
        .enumerate()
        .find(|(_, q)| !seen.insert(q.id))
    {
        return Err(LoadError::DuplicateId {
            path: path.to_path_buf(),
            index,
            id: question.id,
        });
    }

    tracing::debug!(path = %path.display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

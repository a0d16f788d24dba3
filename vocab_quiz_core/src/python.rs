//! Python bindings (feature `python`)

use pyo3::prelude::*;

use crate::config::QuizConfig;
use crate::db::SqliteStorage;
use crate::error::QuizError;
use crate::evaluator::AnswerOutcome;
use crate::questions::Question;
use crate::session::QuizSession;
use crate::word_store::RawEntry;

fn to_py_err(e: QuizError) -> PyErr {
    pyo3::exceptions::PyRuntimeError::new_err(e.to_string())
}

/// Question as seen from Python
#[pyclass(name = "Question")]
#[derive(Debug, Clone)]
pub struct PyQuestion {
    #[pyo3(get)]
    pub term: String,
    #[pyo3(get)]
    pub modality: String,
    #[pyo3(get)]
    pub prompt: String,
    #[pyo3(get)]
    pub options: Vec<String>,
}

#[pymethods]
impl PyQuestion {
    fn __repr__(&self) -> String {
        format!("Question(term='{}', modality='{}')", self.term, self.modality)
    }
}

impl From<&Question> for PyQuestion {
    fn from(question: &Question) -> Self {
        Self {
            term: question.term.clone(),
            modality: question.modality.to_string(),
            prompt: question.prompt.clone(),
            options: question.options.clone(),
        }
    }
}

#[pyclass(name = "AnswerOutcome")]
#[derive(Debug, Clone)]
pub struct PyAnswerOutcome {
    #[pyo3(get)]
    pub is_correct: bool,
    #[pyo3(get)]
    pub graduated: bool,
    #[pyo3(get)]
    pub correct_answer: String,
}

#[pymethods]
impl PyAnswerOutcome {
    fn __repr__(&self) -> String {
        format!(
            "AnswerOutcome(is_correct={}, graduated={})",
            self.is_correct, self.graduated
        )
    }
}

impl From<AnswerOutcome> for PyAnswerOutcome {
    fn from(outcome: AnswerOutcome) -> Self {
        Self {
            is_correct: outcome.is_correct,
            graduated: outcome.graduated,
            correct_answer: outcome.correct_answer,
        }
    }
}

/// Quiz session persisting progress to a SQLite file
#[pyclass(name = "QuizSession", unsendable)]
pub struct PyQuizSession {
    inner: QuizSession<SqliteStorage>,
}

#[pymethods]
impl PyQuizSession {
    /// `words` holds `(term, pronunciation, meaning)` tuples.
    #[new]
    #[pyo3(signature = (db_path, words, config_json=None))]
    fn new(
        db_path: &str,
        words: Vec<(String, Option<String>, String)>,
        config_json: Option<&str>,
    ) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => QuizConfig::from_json(json).map_err(to_py_err)?,
            None => QuizConfig::default(),
        };
        let imported = words
            .into_iter()
            .map(|(term, pronunciation, meaning)| RawEntry {
                term,
                pronunciation,
                meaning,
            })
            .collect();
        let storage = SqliteStorage::open(db_path).map_err(to_py_err)?;
        let inner = QuizSession::start(imported, storage, config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn next_question(&mut self) -> PyResult<PyQuestion> {
        self.inner.next_question().map(|q| PyQuestion::from(&q)).map_err(to_py_err)
    }

    fn skip_question(&mut self) -> PyResult<PyQuestion> {
        self.inner.skip_question().map(|q| PyQuestion::from(&q)).map_err(to_py_err)
    }

    fn answer(&mut self, option: &str) -> PyResult<PyAnswerOutcome> {
        self.inner.answer(option).map(PyAnswerOutcome::from).map_err(to_py_err)
    }

    /// `(total_attempts, correct_count, incorrect_count, accuracy_percent)`
    fn stats(&self) -> (u32, u32, u32, f64) {
        let stats = self.inner.stats();
        (
            stats.total_attempts,
            stats.correct_count,
            stats.incorrect_count,
            stats.accuracy_percent(),
        )
    }

    fn active_count(&self) -> usize {
        self.inner.active_words().len()
    }

    fn mastered_count(&self) -> usize {
        self.inner.mastered_words().len()
    }
}

#[pyfunction]
#[pyo3(name = "parse_file")]
pub fn py_parse_file(file_path: &str) -> PyResult<Vec<(String, Option<String>, String)>> {
    crate::import::parse_file(file_path)
        .map(|words| {
            words
                .into_iter()
                .map(|w| (w.term, w.pronunciation, w.meaning))
                .collect()
        })
        .map_err(to_py_err)
}

/// Vocabulary quiz core Python module
#[pymodule]
fn vocab_quiz_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_parse_file, m)?)?;

    m.add_class::<PyQuizSession>()?;
    m.add_class::<PyQuestion>()?;
    m.add_class::<PyAnswerOutcome>()?;

    Ok(())
}

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::*;
use crate::store::parameter_store::*;

/// SSM caps a by-path page at ten results.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A call made against a [`LocalStorage`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    GetParameter { name: String, with_decryption: bool },
    GetParametersByPath(PathQuery),
}

#[derive(Default)]
struct State {
    parameters: BTreeMap<String, Parameter>,
    scripted_pages: VecDeque<ParameterPage>,
    calls: Vec<StoreCall>,
}

/// In-memory parameter store. Keys are matched verbatim, so a versioned
/// lookup such as `/app/key:2` needs its own entry.
#[derive(Clone)]
pub struct LocalStorage {
    state: Arc<Mutex<State>>,
    page_size: usize,
    missing_as_empty: bool,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            page_size: DEFAULT_PAGE_SIZE,
            missing_as_empty: false,
        }
    }

    pub fn with_parameters(parameters: Vec<Parameter>) -> Self {
        let storage = Self::new();
        if let Ok(mut state) = storage.state.lock() {
            for parameter in parameters {
                state
                    .parameters
                    .insert(parameter.name().as_str().to_string(), parameter);
            }
        }
        storage
    }

    /// By-path calls return these pages in order, ignoring the stored
    /// parameters, until the script runs out.
    pub fn with_scripted_pages(pages: Vec<ParameterPage>) -> Self {
        let storage = Self::new();
        if let Ok(mut state) = storage.state.lock() {
            state.scripted_pages = pages.into();
        }
        storage
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Answer unknown names with an empty response instead of a not-found error.
    pub fn missing_as_empty(mut self) -> Self {
        self.missing_as_empty = true;
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state
            .lock()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|e| StoreError::RequestFailed(format!("Local store poisoned: {e}")))
    }

    fn is_under_path(name: &str, path: &str, recursive: bool) -> bool {
        let prefix = if path.ends_with(PATH_SEPARATOR) {
            path.to_string()
        } else {
            format!("{path}{PATH_SEPARATOR}")
        };

        match name.strip_prefix(&prefix) {
            Some(rest) if !rest.is_empty() => recursive || !rest.contains(PATH_SEPARATOR),
            _ => false,
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ParameterStore for LocalStorage {
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<Parameter>, StoreError> {
        let mut state = self.lock()?;
        state.calls.push(StoreCall::GetParameter {
            name: name.to_string(),
            with_decryption,
        });

        match state.parameters.get(name) {
            Some(parameter) => Ok(Some(parameter.clone())),
            None if self.missing_as_empty => Ok(None),
            None => Err(StoreError::ParameterNotFound(name.to_string())),
        }
    }

    async fn get_parameters_by_path(
        &self,
        query: PathQuery,
    ) -> Result<ParameterPage, StoreError> {
        let mut state = self.lock()?;
        state.calls.push(StoreCall::GetParametersByPath(query.clone()));

        if let Some(page) = state.scripted_pages.pop_front() {
            return Ok(page);
        }

        let offset = match &query.next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| StoreError::InvalidNextToken(token.clone()))?,
            None => 0,
        };

        let matching: Vec<Parameter> = state
            .parameters
            .values()
            .filter(|p| Self::is_under_path(p.name().as_str(), &query.path, query.recursive))
            .cloned()
            .collect();

        if offset > matching.len() {
            return Err(StoreError::InvalidNextToken(offset.to_string()));
        }

        let end = (offset + self.page_size).min(matching.len());
        let next_token = (end < matching.len()).then(|| end.to_string());

        Ok(ParameterPage::new(matching[offset..end].to_vec(), next_token))
    }
}

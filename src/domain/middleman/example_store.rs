//! Few-shot 예시 저장소
//!
//! 시작 시 `{ "input", "output" }` 레코드의 JSON 배열에서 한 번 로드합니다.
//! 로드 후에는 변경되지 않으며 요청 간 읽기 전용으로 공유됩니다.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// UI 프리셋으로 노출하는 예시 수
pub const PRESET_COUNT: usize = 3;

/// (input, output) few-shot 예시 한 쌍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
}

impl Example {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExampleStoreError {
    #[error("failed to read example file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed example file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 순서가 있는 불변 few-shot 예시 모음
#[derive(Debug, Clone, Default)]
pub struct ExampleStore {
    examples: Arc<[Example]>,
}

impl ExampleStore {
    /// 예시 파일을 읽고 파싱합니다. 여기서의 실패는 시작 전제 조건 실패입니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExampleStoreError> {
        let path = path.as_ref();

        let raw = std::fs::read_to_string(path).map_err(|source| ExampleStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_json(&raw).map_err(|source| ExampleStoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        if store.is_empty() {
            tracing::warn!(path = %path.display(), "Example file contains no examples");
        } else {
            tracing::info!(
                path = %path.display(),
                count = store.len(),
                "Few-shot examples loaded"
            );
        }

        Ok(store)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let examples: Vec<Example> = serde_json::from_str(raw)?;
        Ok(Self::from(examples))
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// 예시 공유 핸들 (참조 카운트만 복제)
    pub fn shared(&self) -> Arc<[Example]> {
        Arc::clone(&self.examples)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// 앞쪽 예시들의 input (저장 순서)
    pub fn presets(&self) -> Vec<String> {
        self.examples
            .iter()
            .take(PRESET_COUNT)
            .map(|example| example.input.clone())
            .collect()
    }
}

impl From<Vec<Example>> for ExampleStore {
    fn from(examples: Vec<Example>) -> Self {
        Self {
            examples: examples.into(),
        }
    }
}

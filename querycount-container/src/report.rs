use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use querycount_error::{Result, json_err};

use crate::record::QueryRecord;

const INDENT: &[u8] = b"    ";

// 필드는 알파벳 순으로 선언해 직렬화 시 키가 정렬되도록 한다

/// API 호출 하나의 집계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCallReport {
    pub method: String,
    pub path: String,
    /// 상세 리포트에만 포함
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<QueryRecord>>,
    pub total: usize,
}

/// 테스트 케이스 하나의 집계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseReport {
    pub id: String,
    pub queries: Vec<ApiCallReport>,
    #[serde(default)]
    pub total: usize,
}

/// 테스트 실행 전체 리포트
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryCountReport {
    pub test_cases: Vec<TestCaseReport>,
    #[serde(default)]
    pub total: usize,
}

impl QueryCountReport {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// 리포트 파일 로드
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("리포트 로드: {}", path.display());
        let file = File::open(path).map_err(|e| {
            io::Error::new(e.kind(), format!("리포트 열기 실패 ({}): {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| json_err(format!("리포트 파싱 실패 ({}): {e}", path.display())))
    }

    /// 4칸 들여쓰기 JSON 으로 출력
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.to_writer(&mut buf)?;
        String::from_utf8(buf).map_err(|e| json_err(format!("UTF-8 변환 실패: {e}")))
    }

    /// 리포트 파일 저장. 상위 디렉토리가 없으면 생성
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;

        info!(
            "리포트 저장 완료: {} (테스트 케이스 {}개, 쿼리 {}개)",
            path.display(),
            self.test_cases.len(),
            self.total
        );
        Ok(())
    }

    pub fn find(&self, test_case_id: &str) -> Option<&TestCaseReport> {
        self.test_cases.iter().find(|test_case| test_case.id == test_case_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querycount_error::QueryCountError;

    fn sample() -> QueryCountReport {
        QueryCountReport {
            test_cases: vec![TestCaseReport {
                id: "app.tests.EventTest.test_list".to_string(),
                queries: vec![ApiCallReport {
                    method: "GET".to_string(),
                    path: "/api/events".to_string(),
                    queries: None,
                    total: 3,
                }],
                total: 3,
            }],
            total: 3,
        }
    }

    #[test]
    fn test_summary_output_is_sorted_and_indented() {
        let text = sample().to_string_pretty().unwrap();
        let expected = r#"{
    "test_cases": [
        {
            "id": "app.tests.EventTest.test_list",
            "queries": [
                {
                    "method": "GET",
                    "path": "/api/events",
                    "total": 3
                }
            ],
            "total": 3
        }
    ],
    "total": 3
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_detail_queries_are_optional_on_load() {
        let report = QueryCountReport::parse(
            r#"{"test_cases": [{"id": "t", "queries": [
                {"method": "get", "path": "/a", "total": 1,
                 "queries": [{"sql": "SELECT 1", "time": 0.5}]},
                {"method": "get", "path": "/b", "total": 0}
            ]}]}"#,
        )
        .unwrap();

        assert_eq!(report.total, 0);
        let test_case = report.find("t").unwrap();
        assert_eq!(test_case.queries[0].queries.as_ref().unwrap()[0].sql, "SELECT 1");
        assert!(test_case.queries[1].queries.is_none());
        assert!(report.find("missing").is_none());
    }

    #[test]
    fn test_missing_test_cases_is_error() {
        assert!(matches!(
            QueryCountReport::parse(r#"{"total": 3}"#),
            Err(QueryCountError::Json(_))
        ));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("reports").join("query_count.json");

        sample().save(&path).unwrap();

        let loaded = QueryCountReport::from_file(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"test_cases\": [").unwrap();

        match QueryCountReport::from_file(&path) {
            Err(QueryCountError::Json(msg)) => assert!(msg.contains("broken.json")),
            other => panic!("Expected json error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.json");

        match QueryCountReport::from_file(&path) {
            Err(QueryCountError::Io(err)) => {
                assert_eq!(err.kind(), io::ErrorKind::NotFound);
                assert!(err.to_string().contains("typo.json"));
            }
            other => panic!("Expected io error, got {other:?}"),
        }
    }
}

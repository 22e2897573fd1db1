use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use querycount_error::{Result, json_err, report_err};

const INDEX_TEMPLATE: &str = include_str!("../templates/report-index.html");
const APP_JS: &str = include_str!("../static/app.js");
const REPORT_PLACEHOLDER: &str = "{report}";

/// 쿼리 카운트 리포트(JSON)로 정적 HTML 리포트 생성
pub struct Reporter;

impl Reporter {
    /// `output_dir` 에 `index.html` 과 `app.js` 생성
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        query_count_file: P,
        output_dir: Q,
    ) -> Result<()> {
        let query_count_file = query_count_file.as_ref();
        let output_dir = output_dir.as_ref();

        let report = Self::load_report(query_count_file)?;
        Self::ensure_dir(output_dir)?;
        Self::write_index(&report, output_dir)?;
        Self::write_assets(output_dir)?;

        info!(
            "HTML 리포트 생성 완료: {} -> {}",
            query_count_file.display(),
            output_dir.join("index.html").display()
        );
        Ok(())
    }

    fn load_report(path: &Path) -> Result<Value> {
        debug!("리포트 로드: {}", path.display());
        let file = File::open(path).map_err(|e| {
            io::Error::new(e.kind(), format!("리포트 열기 실패 ({}): {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| json_err(format!("리포트 파싱 실패 ({}): {e}", path.display())))
    }

    fn ensure_dir(output_dir: &Path) -> Result<()> {
        fs::create_dir_all(output_dir).map_err(|e| {
            report_err(format!("출력 디렉토리 생성 실패 ({}): {e}", output_dir.display()))
        })
    }

    /// 리포트 JSON 을 템플릿에 삽입
    pub fn render_index(report: &Value) -> Result<String> {
        // <script> 블록 안에 들어가므로 `</` 를 이스케이프
        let report = serde_json::to_string(report)?.replace("</", "<\\/");
        Ok(INDEX_TEMPLATE.replace(REPORT_PLACEHOLDER, &report))
    }

    fn write_index(report: &Value, output_dir: &Path) -> Result<()> {
        let output_index = output_dir.join("index.html");
        fs::write(&output_index, Self::render_index(report)?)?;
        debug!("index.html 생성: {}", output_index.display());
        Ok(())
    }

    fn write_assets(output_dir: &Path) -> Result<()> {
        fs::write(output_dir.join("app.js"), APP_JS)?;
        Ok(())
    }
}

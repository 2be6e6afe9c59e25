use crate::common::*;

/* 핸들이 drop 되면 로거가 종료되므로 프로세스 수명 동안 전역으로 유지한다 */
static LOGGER_HANDLE: once_lazy<LoggerHandle> = once_lazy::new(build_global_logger);

#[doc = r#"
    전역 로거를 설정해주는 함수.

    flexi_logger 를 사용하여 `logs/` 디렉토리에 일 단위로 로테이션되는 로그 파일을
    생성하고, 동일한 내용을 stdout 에도 출력한다. 로그 파일은 최대 7개까지 보관된다.

    # Panics
    로거 초기화에 실패한 경우 애플리케이션 종료
"#]
pub fn set_global_logger() {
    once_lazy::force(&LOGGER_HANDLE);
}

fn build_global_logger() -> LoggerHandle {
    Logger::try_with_str("info")
        .expect("[logger_utils->build_global_logger] Invalid log specification")
        .log_to_file(FileSpec::default().directory("logs"))
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(7),
        )
        .duplicate_to_stdout(Duplicate::All)
        .format(custom_log_format)
        .start()
        .expect("[logger_utils->build_global_logger] Failed to start logger")
}

#[doc = "로그 한 줄의 출력 형식을 지정해주는 함수"]
fn custom_log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.args()
    )
}

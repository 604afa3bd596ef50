use super::*;

#[test]
fn export_name_uses_target_as_extension() {
    assert_eq!(
        export_file_name(&LanguageId::new("java"), 1_700_000_000_000),
        "translation_1700000000000.java"
    );
}

#[tokio::test]
async fn export_writes_result_bytes_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let text = "public class Main {\n    int x = 1;\n}\n\u{00e9}";

    let path = export_translation(dir.path(), &LanguageId::new("java"), text)
        .await
        .expect("export");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .expect("file name");
    assert!(file_name.starts_with("translation_"), "{file_name}");
    assert!(file_name.ends_with(".java"), "{file_name}");
    assert_eq!(std::fs::read(&path).expect("read back"), text.as_bytes());
}

#[tokio::test]
async fn export_creates_missing_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("out").join("java");

    let path = export_translation(&nested, &LanguageId::new("c"), "int x = 1;")
        .await
        .expect("export");
    assert!(path.starts_with(&nested));
}

#[tokio::test]
async fn read_round_trips_file_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("main.c");
    std::fs::write(&path, "int main() { return 0; }\n").expect("write");

    let text = read_source_file(&path).await.expect("read");
    assert_eq!(text, "int main() { return 0; }\n");
}

#[tokio::test]
async fn read_missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = read_source_file(&dir.path().join("missing.c"))
        .await
        .expect_err("missing");
    assert!(err.to_string().contains("missing.c"));
}

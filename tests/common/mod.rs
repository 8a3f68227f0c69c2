// Shared test helpers for integration tests
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes a test plan file into the temporary directory and returns its path.
/// 将测试计划文件写入临时目录并返回其路径。
pub fn write_plan(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let plan_path = temp_dir.path().join(name);
    fs::write(&plan_path, content).expect("Failed to write test plan fixture");
    plan_path
}

/// A plan whose TOML is syntactically broken.
/// TOML 语法已损坏的计划。
pub fn create_invalid_toml(temp_dir: &TempDir) -> PathBuf {
    let content = r#"
language = "en"
# Invalid TOML - missing closing bracket
command = "sh runner.sh {module}"
modules = ["test_alpha"
"#;
    write_plan(temp_dir, "invalid.toml", content)
}

/// A plan that parses but whose command template lacks the module placeholder.
/// 可以解析但命令模板缺少模块占位符的计划。
pub fn create_missing_placeholder_plan(temp_dir: &TempDir) -> PathBuf {
    let content = r#"
language = "en"
command = "sh runner.sh"
modules = ["test_alpha"]
"#;
    write_plan(temp_dir, "missing_placeholder.toml", content)
}

/// A plan that parses but whose command template is blank.
/// 可以解析但命令模板为空白的计划。
pub fn create_empty_command_plan(temp_dir: &TempDir) -> PathBuf {
    let content = r#"
language = "en"
command = "   "
modules = ["test_alpha"]
"#;
    write_plan(temp_dir, "empty_command.toml", content)
}

/// A plan missing the required module list.
/// 缺少必需模块列表的计划。
pub fn create_incomplete_plan(temp_dir: &TempDir) -> PathBuf {
    let content = r#"
language = "en"
command = "sh runner.sh {module}"
"#;
    write_plan(temp_dir, "incomplete.toml", content)
}

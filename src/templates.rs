pub const SHELL_SCRIPT_TEMPLATE: &str = include_str!("../templates/shell_script.sh");
pub const DEFAULT_SUITE_YAML: &str = include_str!("../suites/case.yaml");

const SCRIPT_PLACEHOLDER: &str = "{{script}}";

/// Fill the shell boilerplate with a scenario body.
pub fn render_shell_script(script: &str) -> String {
    SHELL_SCRIPT_TEMPLATE.replacen(SCRIPT_PLACEHOLDER, script, 1)
}

use std::path::Path;

pub const PRODUCT: &str = "SiMOS";

const LOGO: &str = r#"
 .----..-..-.   .-. .----.  .----.
{ {__  | ||  `.'  |/  {}  \{ {__
.-._} }| || |\ /| |\      /.-._} }
`----' `-'`-' ` `-' `----' `----'
"#;

/// Startup text: logo (unless suppressed), version, root and a hint.
pub fn greeting(version: &str, root: &Path, show_logo: bool) -> String {
    let mut out = String::new();
    if show_logo {
        out.push_str(LOGO);
        out.push('\n');
    }
    out.push_str(&format!(
        "{} Version {}\nRoot directory: {}\nType \"help\" for available commands, \"exit\" to quit.",
        PRODUCT,
        version,
        root.display()
    ));
    out
}

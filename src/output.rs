// Terminal status lines

pub fn header(text: &str) {
    let rule = "=".repeat(60);
    println!();
    println!("{}", rule);
    println!("  {}", text);
    println!("{}", rule);
    println!();
}

pub fn success(text: &str) {
    println!("✅ {}", text);
}

pub fn error(text: &str) {
    eprintln!("❌ {}", text);
}

pub fn warning(text: &str) {
    println!("⚠️  {}", text);
}

pub fn info(text: &str) {
    println!("ℹ️  {}", text);
}

/// One line of a report, printed with the marker of its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Error(String),
    Info(String),
    Plain(String),
}

impl Line {
    pub fn print(&self) {
        match self {
            Line::Error(text) => error(text),
            Line::Info(text) => info(text),
            Line::Plain(text) => println!("{}", text),
        }
    }
}

//! The `quizrun init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizrun.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("questions")?;
    for (name, content) in [
        ("questions/test1.json", PART_ONE),
        ("questions/part2.json", PART_TWO),
        ("questions/test3.js", PART_THREE),
    ] {
        write_if_missing(Path::new(name), content)?;
    }

    println!("\nNext steps:");
    println!("  1. Add question files to questions/ and list their parts in quizrun.toml");
    println!("  2. Run: quizrun validate --dir questions");
    println!("  3. Run: quizrun play --all");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizrun configuration

# Parts offered by `quizrun play --all`
parts = ["1", "2", "3"]
parallelism = 4
output_dir = "./quizrun-results"

[source]
type = "dir"
path = "./questions"

# To fetch from a web server instead:
# [source]
# type = "http"
# base_url = "${QUIZ_BASE_URL}"
# timeout_secs = 30

[limits]
presets = [100]
step = 50
floor = 10
"#;

const PART_ONE: &str = r#"[
  {
    "question": "Which keyword declares an immutable binding in Rust?",
    "options": ["let", "mut", "static", "const fn"],
    "correct_answer": "let"
  },
  {
    "question": "What does `cargo build --release` enable?",
    "options": ["Optimizations", "Debug assertions", "Incremental tests"],
    "correct_answer": "Optimizations"
  },
  {
    "question": "Which type owns a growable UTF-8 string?",
    "options": ["&str", "String", "char"],
    "correct_answer": "String"
  }
]
"#;

const PART_TWO: &str = r#"{
  "questions": [
    {
      "question": "Which HTTP status code means Not Found?",
      "answers": ["200", "301", "404", "500"],
      "correct": "404"
    },
    {
      "question": "Which port does HTTPS use by default?",
      "answers": ["80", "443", "8080"],
      "correct": "443"
    },
    {
      "question": "Which HTTP method is idempotent?",
      "answers": ["PUT", "POST"],
      "correct": "PUT"
    }
  ]
}
"#;

const PART_THREE: &str = r#"// Script-shaped question file
const part3 = {
  "questions": [
    {
      "question": "Which command lists files in a directory?",
      "answers": ["ls", "cd", "pwd"],
      "correct": "ls"
    },
    {
      "question": "Which signal does Ctrl+C send?",
      "answers": ["SIGINT", "SIGKILL", "SIGHUP"],
      "correct": "SIGINT"
    }
  ]
};
"#;

//! Starter file trees mounted when a language is selected.

use crate::runtime::Language;
use crate::sandbox::{FileTree, TreeNode};

const JS_ENTRY: &str = r#"import dayjs from 'dayjs';

const now = dayjs();
console.log('Hello from the sandbox!');
console.log('Current time:', now.format('YYYY-MM-DD HH:mm:ss'));
"#;

const JS_PACKAGE_JSON: &str = r#"{
  "name": "sandbox-app",
  "version": "1.0.0",
  "type": "module",
  "dependencies": {
    "dayjs": "^1.11.10"
  }
}
"#;

const RUST_ENTRY: &str = r#"fn main() {
    println!("Hello from the sandbox!");

    let numbers = vec![1, 2, 3, 4, 5];
    let sum: i32 = numbers.iter().sum();
    println!("Sum of {:?} is {}", numbers, sum);
}
"#;

const RUST_MANIFEST: &str = r#"[package]
name = "sandbox-app"
version = "0.1.0"
edition = "2021"
"#;

/// The starter tree for a language. Always contains the language's
/// entry file at the top level.
pub fn template(language: Language) -> FileTree {
    let mut tree = FileTree::new();
    match language {
        Language::JavaScript => {
            tree.insert("index.js".into(), TreeNode::file(JS_ENTRY));
            tree.insert("package.json".into(), TreeNode::file(JS_PACKAGE_JSON));
        }
        Language::Rust => {
            tree.insert("main.rs".into(), TreeNode::file(RUST_ENTRY));
            tree.insert("Cargo.toml".into(), TreeNode::file(RUST_MANIFEST));
        }
    }
    tree
}

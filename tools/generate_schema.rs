//! JSON Schema生成ツール
//!
//! src/domain/config.rsの設定構造から schema/config.json を自動生成します。
//! 設定項目の説明はconfig.rsのdoc commentsがそのままスキーマへ入ります。
//!
//! 実行方法:
//! ```
//! cargo run --bin generate_schema
//! ```

use schemars::schema_for;
use std::fs;
use BadGuyDetector::domain::config::AppConfig;

fn main() {
    println!("JSON Schema生成中...");

    let schema = schema_for!(AppConfig);
    let json = serde_json::to_string_pretty(&schema).expect("Failed to serialize schema to JSON");

    fs::create_dir_all("schema").expect("Failed to create schema/ directory");
    fs::write("schema/config.json", json).expect("Failed to write schema/config.json");

    println!("✅ 生成完了: schema/config.json");
}

// src/ui.rs

use crate::{constants, models::ExtractionResult, symbols, utils};
use colored::*;

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn print_sub_header(title: &str) {
    println!("\n--- {} ---", title.bold());
}

pub fn box_message(title: &str, content: &[&str], color_func: fn(ColoredString) -> ColoredString) {
    println!("\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {}", color_func(title.bold()));
    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));
    for line in content {
        println!("  {}", line);
    }
    println!("└{}┘", "─".repeat(constants::UI_WIDTH - 2));
}

fn print_entries(entries: &[String], tag: &ColoredString) {
    let pad = entries.len().to_string().len();
    for (i, entry) in entries.iter().enumerate() {
        // "标题 : 地址"，标题过长时截断，地址保持完整以便复制
        let (title, url) = entry.split_once(" : ").unwrap_or(("", entry.as_str()));
        println!(
            "  [{}] {} {} : {}",
            format!("{:<pad$}", i + 1, pad = pad).yellow(),
            tag,
            utils::truncate_text(title, constants::TITLE_TRUNCATE_LENGTH),
            url
        );
    }
}

pub fn print_extraction_result(result: &ExtractionResult) {
    print_header("提取结果");
    if result.is_empty() {
        println!("\n{} 未提取到任何视频或 PDF。", *symbols::WARN);
        return;
    }

    print_sub_header(&format!("视频 (m3u8) - {} 个", result.video_urls.len()));
    print_entries(&result.video_urls, &symbols::VIDEO);
    print_sub_header(&format!("文档 (pdf) - {} 个", result.pdf_urls.len()));
    print_entries(&result.pdf_urls, &symbols::PDF);

    println!(
        "\n{} {} | {}",
        *symbols::OK,
        format!("视频: {}", result.video_urls.len()).green(),
        format!("PDF: {}", result.pdf_urls.len()).green()
    );
}

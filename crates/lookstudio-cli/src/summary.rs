use std::path::Path;

use console::Style;
use lookstudio_core::presets::StyleCatalog;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub struct EditSummary<'a> {
    pub input: &'a Path,
    pub mime_type: &'a str,
    pub model: &'a str,
    pub style: Option<&'a str>,
    pub instruction: &'a str,
}

pub fn print_edit_summary(summary: &EditSummary<'_>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Look Studio"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(11)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(summary.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Type"),
        s.value.apply_to(summary.mime_type)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Model"),
        s.method.apply_to(summary.model)
    );
    if let Some(style) = summary.style {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Style"),
            s.method.apply_to(style)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Instruction"),
        s.value.apply_to(summary.instruction)
    );
    println!();
}

pub fn print_result(output: &Path, mime_type: &str, size: usize) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Result"),
        s.value
            .apply_to(format!("{mime_type}, {:.1} KB", size as f64 / 1024.0))
    );
    println!();
}

pub fn print_styles(catalog: &StyleCatalog) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Style Presets"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    if catalog.is_empty() {
        println!("  {}", s.label.apply_to("none configured"));
    }
    for preset in catalog.iter() {
        println!("  {}", s.method.apply_to(&preset.name));
        println!("    {}", s.label.apply_to(&preset.instruction));
    }
    println!();
}

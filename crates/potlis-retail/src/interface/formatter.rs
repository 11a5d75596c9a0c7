//! Rendering display units as message text

use super::display::DisplayUnit;
use super::interface::BotPlatform;

pub trait Formatter: Send + Sync {
    fn platform(&self) -> BotPlatform;
    fn format_unit(&self, unit: &DisplayUnit) -> String;
    fn format_notice(&self, notice: &str) -> String;
    fn format_help(&self) -> String;

    /// Render a whole batch, units separated by a blank line
    fn format_batch(&self, units: &[DisplayUnit]) -> String {
        units
            .iter()
            .map(|unit| self.format_unit(unit))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Markdown output for chat clients that render it
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Chat
    }

    fn format_unit(&self, unit: &DisplayUnit) -> String {
        let mut output = format!("**{}**\n{}\n", unit.title, unit.description);
        output.push_str(&format!(
            "Regular💸 {} | Sale💸 {}\n",
            unit.regular_price, unit.sale_price
        ));
        output.push_str(&format!("Online Store: {}\n", unit.online_stock));
        if let Some(breakdown) = &unit.store_breakdown {
            output.push_str(&format!("📍 {breakdown}\n"));
        }
        output.push_str(&format!("In Store: {}\n", unit.in_store_stock));
        output.push_str(&format!("{}\n_{}_", unit.image_url, unit.footer));
        output
    }

    fn format_notice(&self, notice: &str) -> String {
        notice.to_string()
    }

    fn format_help(&self) -> String {
        "*Potlis*\n\
        /bestbuy product <query> [--category <id>] [--max <n>] - Search products and stock\n\
        /ping - Check the bot is alive\n\
        /help - Show help"
            .to_string()
    }
}

/// Terminal output with the markup stripped
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::CLI
    }

    fn format_unit(&self, unit: &DisplayUnit) -> String {
        let mut output = format!("== {} ==\n", unit.title);
        output.push_str(&format!("{}\n", strip_markup(&unit.description)));
        output.push_str(&format!(
            "Regular: {}  Sale: {}\n",
            unit.regular_price, unit.sale_price
        ));
        output.push_str(&format!("Online Store: {}\n", unit.online_stock));
        if let Some(breakdown) = &unit.store_breakdown {
            output.push_str(&format!("Stores: {}\n", strip_markup(breakdown)));
        }
        output.push_str(&format!("In Store: {}\n", unit.in_store_stock));
        output.push_str(&format!("Image: {}\n{}", unit.image_url, unit.footer));
        output
    }

    fn format_notice(&self, notice: &str) -> String {
        format!("» {notice}")
    }

    fn format_help(&self) -> String {
        "Potlis Commands:\n\
        /bestbuy product <query> [--category <id>] [--max <n>] - Search products and stock\n\
        /ping - Check the bot is alive\n\
        /shutdown - Stop the bot (owners only)\n\
        /help - Show help\n\
        /exit - Exit"
            .to_string()
    }
}

/// Turn `[text](url)` into `text <url>` and drop `**` emphasis
fn strip_markup(text: &str) -> String {
    let text = text.replace("**", "");
    match (text.find('['), text.rfind("](")) {
        (Some(0), Some(split)) if text.ends_with(')') => {
            let label = &text[1..split];
            let url = &text[split + 2..text.len() - 1];
            format!("{label} <{url}>")
        }
        _ => text,
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(platform: BotPlatform) -> Box<dyn Formatter> {
        match platform {
            BotPlatform::CLI => Box::new(PlainFormatter),
            BotPlatform::Chat => Box::new(MarkdownFormatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> DisplayUnit {
        DisplayUnit {
            sku: "42".to_string(),
            title: "Fast SSD".to_string(),
            description: "[1TB NVMe](https://shop.test/product/42)".to_string(),
            regular_price: "$149.99".to_string(),
            sale_price: "$119.99".to_string(),
            image_url: "https://img.test/42.jpg".to_string(),
            online_stock: "In Stock: 5".to_string(),
            in_store_stock: "In Stock: 3".to_string(),
            store_breakdown: Some("**Downtown** has: 3".to_string()),
            footer: "SKU: 42 requested at: 2024-01-01 12:00:00-05:00".to_string(),
        }
    }

    #[test]
    fn test_markdown_keeps_markup() {
        let text = MarkdownFormatter.format_unit(&unit());
        assert!(text.starts_with("**Fast SSD**\n[1TB NVMe](https://shop.test/product/42)"));
        assert!(text.contains("Online Store: In Stock: 5"));
        assert!(text.contains("📍 **Downtown** has: 3"));
    }

    #[test]
    fn test_plain_strips_markup() {
        let text = PlainFormatter.format_unit(&unit());
        assert!(text.contains("1TB NVMe <https://shop.test/product/42>"));
        assert!(text.contains("Stores: Downtown has: 3"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_plain_without_breakdown() {
        let mut unit = unit();
        unit.store_breakdown = None;
        let text = PlainFormatter.format_unit(&unit);
        assert!(!text.contains("Stores:"));
        assert!(text.contains("In Store: In Stock: 3"));
    }

    #[test]
    fn test_factory() {
        assert_eq!(FormatterFactory::create(BotPlatform::CLI).platform(), BotPlatform::CLI);
        assert_eq!(FormatterFactory::create(BotPlatform::Chat).platform(), BotPlatform::Chat);
    }

    #[test]
    fn test_format_batch_joins_units() {
        let text = PlainFormatter.format_batch(&[unit(), unit()]);
        assert_eq!(text.matches("== Fast SSD ==").count(), 2);
    }
}

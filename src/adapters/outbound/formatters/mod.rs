pub mod html_formatter;
pub mod json_formatter;

pub use html_formatter::HtmlReportFormatter;
pub use json_formatter::JsonReportFormatter;

mod report_display;

pub use report_display::ReportDisplay;

use fltk::{
    app::Sender,
    browser::HoldBrowser,
    enums::{Align, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
    text::{TextBuffer, TextDisplay},
};

use crate::app::domain::{Complexity, ExecutionResult, Pattern};
use crate::app::messages::Message;

pub const SIDE_PANEL_WIDTH: i32 = 320;

/// Pattern list, complexity badge and test results, stacked to the right of
/// the editor.
pub struct SidePanel {
    pub flex: Flex,
    pub patterns: HoldBrowser,
    pub summary: Frame,
    pub results: TextDisplay,
    results_buffer: TextBuffer,
}

impl SidePanel {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut flex = Flex::default();
        flex.set_type(FlexType::Column);
        flex.set_margin(6);
        flex.set_spacing(6);

        let mut heading = Frame::default().with_label("Detected patterns");
        heading.set_label_font(Font::HelveticaBold);
        heading.set_align(Align::Left | Align::Inside);
        flex.fixed(&heading, 22);

        let mut patterns = HoldBrowser::default();
        patterns.set_frame(FrameType::FlatBox);
        patterns.set_callback(move |b| {
            // 1-based; 0 means nothing selected
            let line = b.value();
            if line > 0 {
                sender.send(Message::SelectPattern(line as usize - 1));
            }
        });

        let mut summary = Frame::default();
        summary.set_frame(FrameType::FlatBox);
        summary.set_label_font(Font::Courier);
        summary.set_align(Align::Left | Align::Inside | Align::Wrap);
        flex.fixed(&summary, 48);

        let results_buffer = TextBuffer::default();
        let mut results = TextDisplay::default();
        results.set_buffer(results_buffer.clone());
        results.set_text_font(Font::Courier);
        results.set_text_size(12);

        flex.end();

        let mut panel = Self {
            flex,
            patterns,
            summary,
            results,
            results_buffer,
        };
        panel.show_complexity(None, false);
        panel.show_results(None, false);
        panel
    }

    pub fn show_patterns(&mut self, patterns: &[Pattern]) {
        self.patterns.clear();
        for pattern in patterns {
            self.patterns.add(&pattern_row(pattern));
        }
        self.patterns.redraw();
    }

    pub fn show_complexity(&mut self, complexity: Option<&Complexity>, analyzing: bool) {
        let label = if analyzing {
            "Analyzing complexity...".to_string()
        } else {
            complexity_label(complexity)
        };
        self.summary.set_label(&label);
        self.summary.redraw();
    }

    pub fn show_results(&mut self, results: Option<&ExecutionResult>, running: bool) {
        let text = match (results, running) {
            (_, true) => "Running tests...".to_string(),
            (Some(results), false) => results_report(results),
            (None, false) => "No test run yet.".to_string(),
        };
        self.results_buffer.set_text(&text);
    }
}

/// Browser row for one pattern, e.g. `Two Pointers (95%)  lines 8-15`.
pub fn pattern_row(pattern: &Pattern) -> String {
    let lines = if pattern.line_start == pattern.line_end {
        format!("line {}", pattern.line_start)
    } else {
        format!("lines {}-{}", pattern.line_start, pattern.line_end)
    };
    format!("{}  {}", pattern.label(), lines)
}

pub fn complexity_label(complexity: Option<&Complexity>) -> String {
    match complexity {
        Some(c) => match &c.explanation {
            Some(explanation) => format!("{}\n{}", c.summary(), explanation),
            None => c.summary(),
        },
        None => "Complexity not analyzed".to_string(),
    }
}

pub fn results_report(result: &ExecutionResult) -> String {
    let mut lines: Vec<String> = result.console_output.clone();
    lines.push(String::new());

    for test in &result.results {
        let mark = if test.passed { "PASS" } else { "FAIL" };
        let timing = test
            .execution_time_ms
            .map(|ms| format!(" ({} ms)", ms))
            .unwrap_or_default();
        lines.push(format!("{} #{}{}", mark, test.id, timing));
        lines.push(format!("  input:    {}", test.input));
        lines.push(format!("  expected: {}", test.expected));
        if !test.passed {
            lines.push(format!("  actual:   {}", test.actual));
        }
        if let Some(error) = &test.error_message {
            lines.push(format!("  error:    {}", error));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} passed, {} failed in {} ms",
        result.passed_count, result.failed_count, result.total_execution_time_ms
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::mock::fixtures;

    #[test]
    fn test_pattern_row() {
        let patterns = fixtures::patterns();
        assert_eq!(pattern_row(&patterns[0]), "Two Pointers (95%)  lines 8-15");

        let mut single = patterns[1].clone();
        single.line_end = single.line_start;
        assert_eq!(pattern_row(&single), "Sliding Window (87%)  line 3");
    }

    #[test]
    fn test_complexity_label() {
        assert_eq!(complexity_label(None), "Complexity not analyzed");
        let label = complexity_label(Some(&fixtures::linear_complexity()));
        assert!(label.starts_with("Time O(n)"));
        assert!(label.ends_with("hash map storage"));
    }

    #[test]
    fn test_results_report_shows_failures() {
        let result = ExecutionResult::from_results(fixtures::mixed_results(), 0);
        let report = results_report(&result);

        assert!(report.starts_with("Running tests...\nPassed: 2/3"));
        assert!(report.contains("FAIL #2 (8 ms)"));
        assert!(report.contains("  actual:   [2,1]"));
        assert!(report.contains("  error:    Expected [1,2] but got [2,1]"));
        assert!(report.ends_with("2 passed, 1 failed in 26 ms"));
    }
}

use inline_colorization::*;

/// How a budget fulfillment rate is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateStyle {
    /// At or below 90%.
    Under,
    /// Above 90% and below 105%.
    Normal,
    /// 105% up to, not including, 120%.
    Over,
    /// 120% and beyond.
    Critical,
}

impl RateStyle {
    pub fn for_rate(rate: i64) -> Self {
        if rate <= 90 {
            RateStyle::Under
        } else if (105..120).contains(&rate) {
            RateStyle::Over
        } else if rate >= 120 {
            RateStyle::Critical
        } else {
            RateStyle::Normal
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            RateStyle::Under => format!("{style_bold}{color_blue}{text}{color_reset}{style_reset}"),
            RateStyle::Over => format!("{style_bold}{color_yellow}{text}{color_reset}{style_reset}"),
            RateStyle::Critical => format!("{style_bold}{color_red}{text}{color_reset}{style_reset}"),
            RateStyle::Normal => text.to_string(),
        }
    }
}

pub fn format_rate(rate: i64) -> String {
    format!("{}%", rate)
}

/// The rate padded to `width` columns and then colored.
pub fn styled_rate(rate: i64, width: usize) -> String {
    let text = format!("{:<width$}", format_rate(rate), width = width);
    RateStyle::for_rate(rate).paint(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(RateStyle::for_rate(0), RateStyle::Under);
        assert_eq!(RateStyle::for_rate(90), RateStyle::Under);
        assert_eq!(RateStyle::for_rate(91), RateStyle::Normal);
        assert_eq!(RateStyle::for_rate(104), RateStyle::Normal);
        assert_eq!(RateStyle::for_rate(105), RateStyle::Over);
        assert_eq!(RateStyle::for_rate(119), RateStyle::Over);
        assert_eq!(RateStyle::for_rate(120), RateStyle::Critical);
        assert_eq!(RateStyle::for_rate(400), RateStyle::Critical);
    }

    #[test]
    fn test_rendering() {
        assert_eq!(format_rate(85), "85%");
        assert_eq!(styled_rate(100, 6), "100%  ");
        let painted = styled_rate(130, 4);
        assert!(painted.contains("130%"));
        assert!(painted.contains(color_red));
    }
}

//! Chart catalogue
//! Every chart the gallery can show, grouped by category.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartCategory {
    Basic,
    Statistical,
    Financial,
    PartToWhole,
    Specialized,
}

impl ChartCategory {
    pub const ALL: [ChartCategory; 5] = [
        ChartCategory::Basic,
        ChartCategory::Statistical,
        ChartCategory::Financial,
        ChartCategory::PartToWhole,
        ChartCategory::Specialized,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartCategory::Basic => "Basic",
            ChartCategory::Statistical => "Statistical",
            ChartCategory::Financial => "Financial",
            ChartCategory::PartToWhole => "Part to Whole",
            ChartCategory::Specialized => "Specialized",
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = ChartKind> + '_ {
        ChartKind::ALL
            .iter()
            .copied()
            .filter(move |k| k.category() == *self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    GroupedBar,
    StackedBar,
    HorizontalBar,
    Lollipop,
    Line,
    MultiLine,
    Step,
    Area,
    StackedArea,
    Scatter,
    Bubble,
    Histogram,
    Density,
    BoxPlot,
    Violin,
    ErrorBar,
    Candlestick,
    Ohlc,
    Volume,
    Waterfall,
    Pie,
    Donut,
    Treemap,
    Sunburst,
    Funnel,
    Heatmap,
    Radar,
    Gauge,
    Scatter3D,
    TemperatureRange,
}

impl ChartKind {
    pub const ALL: [ChartKind; 31] = [
        ChartKind::Bar,
        ChartKind::GroupedBar,
        ChartKind::StackedBar,
        ChartKind::HorizontalBar,
        ChartKind::Lollipop,
        ChartKind::Line,
        ChartKind::MultiLine,
        ChartKind::Step,
        ChartKind::Area,
        ChartKind::StackedArea,
        ChartKind::Scatter,
        ChartKind::Bubble,
        ChartKind::Histogram,
        ChartKind::Density,
        ChartKind::BoxPlot,
        ChartKind::Violin,
        ChartKind::ErrorBar,
        ChartKind::Candlestick,
        ChartKind::Ohlc,
        ChartKind::Volume,
        ChartKind::Waterfall,
        ChartKind::Pie,
        ChartKind::Donut,
        ChartKind::Treemap,
        ChartKind::Sunburst,
        ChartKind::Funnel,
        ChartKind::Heatmap,
        ChartKind::Radar,
        ChartKind::Gauge,
        ChartKind::Scatter3D,
        ChartKind::TemperatureRange,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::GroupedBar => "Grouped Bar",
            ChartKind::StackedBar => "Stacked Bar",
            ChartKind::HorizontalBar => "Horizontal Bar",
            ChartKind::Lollipop => "Lollipop",
            ChartKind::Line => "Line",
            ChartKind::MultiLine => "Multi-Line",
            ChartKind::Step => "Step",
            ChartKind::Area => "Area",
            ChartKind::StackedArea => "Stacked Area",
            ChartKind::Scatter => "Scatter",
            ChartKind::Bubble => "Bubble",
            ChartKind::Histogram => "Histogram",
            ChartKind::Density => "Density",
            ChartKind::BoxPlot => "Box Plot",
            ChartKind::Violin => "Violin",
            ChartKind::ErrorBar => "Error Bars",
            ChartKind::Candlestick => "Candlestick",
            ChartKind::Ohlc => "OHLC",
            ChartKind::Volume => "Volume",
            ChartKind::Waterfall => "Waterfall",
            ChartKind::Pie => "Pie",
            ChartKind::Donut => "Donut",
            ChartKind::Treemap => "Treemap",
            ChartKind::Sunburst => "Sunburst",
            ChartKind::Funnel => "Funnel",
            ChartKind::Heatmap => "Heat Map",
            ChartKind::Radar => "Radar",
            ChartKind::Gauge => "Gauge",
            ChartKind::Scatter3D => "3D Scatter",
            ChartKind::TemperatureRange => "Temperature Range",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Sales per fruit category.",
            ChartKind::GroupedBar => "Quarterly sales per product, side by side.",
            ChartKind::StackedBar => "Quarterly sales per product, stacked.",
            ChartKind::HorizontalBar => "Categories ranked by value.",
            ChartKind::Lollipop => "Category values as stems with markers.",
            ChartKind::Line => "Revenue over time with a moving average.",
            ChartKind::MultiLine => "Revenue, costs and profit over time.",
            ChartKind::Step => "Revenue as a step function.",
            ChartKind::Area => "Revenue with the area under the curve filled.",
            ChartKind::StackedArea => "Cumulative contribution of each series.",
            ChartKind::Scatter => "Three gaussian clusters.",
            ChartKind::Bubble => "Clusters with a third variable as marker size.",
            ChartKind::Histogram => "Distribution of all group samples in equal-width bins.",
            ChartKind::Density => "Gaussian kernel density estimate per group.",
            ChartKind::BoxPlot => "Quartiles, 1.5 IQR whiskers and outliers per group.",
            ChartKind::Violin => "Mirrored kernel density per group.",
            ChartKind::ErrorBar => "Group means with 95% confidence intervals.",
            ChartKind::Candlestick => "Live daily candles.",
            ChartKind::Ohlc => "Live daily open/high/low/close ticks.",
            ChartKind::Volume => "Live daily traded volume.",
            ChartKind::Waterfall => "Running profit and loss.",
            ChartKind::Pie => "Share of each category.",
            ChartKind::Donut => "Share of each category with a total in the hole.",
            ChartKind::Treemap => "Market sectors and industries, squarified.",
            ChartKind::Sunburst => "Market sectors and industries as rings.",
            ChartKind::Funnel => "Conversion through sales stages.",
            ChartKind::Heatmap => "Activity by weekday and hour.",
            ChartKind::Radar => "Product models across six attributes.",
            ChartKind::Gauge => "A single reading against its range.",
            ChartKind::Scatter3D => "Three clusters in 3D, drag to rotate.",
            ChartKind::TemperatureRange => "Live hourly temperature band and mean.",
        }
    }

    pub fn category(&self) -> ChartCategory {
        match self {
            ChartKind::Bar
            | ChartKind::GroupedBar
            | ChartKind::StackedBar
            | ChartKind::HorizontalBar
            | ChartKind::Lollipop
            | ChartKind::Line
            | ChartKind::MultiLine
            | ChartKind::Step
            | ChartKind::Area
            | ChartKind::StackedArea => ChartCategory::Basic,
            ChartKind::Scatter
            | ChartKind::Bubble
            | ChartKind::Histogram
            | ChartKind::Density
            | ChartKind::BoxPlot
            | ChartKind::Violin
            | ChartKind::ErrorBar => ChartCategory::Statistical,
            ChartKind::Candlestick
            | ChartKind::Ohlc
            | ChartKind::Volume
            | ChartKind::Waterfall => ChartCategory::Financial,
            ChartKind::Pie
            | ChartKind::Donut
            | ChartKind::Treemap
            | ChartKind::Sunburst
            | ChartKind::Funnel => ChartCategory::PartToWhole,
            ChartKind::Heatmap
            | ChartKind::Radar
            | ChartKind::Gauge
            | ChartKind::Scatter3D
            | ChartKind::TemperatureRange => ChartCategory::Specialized,
        }
    }

    /// Fed by the refresh timer.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            ChartKind::Candlestick
                | ChartKind::Ohlc
                | ChartKind::Volume
                | ChartKind::TemperatureRange
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogue_lists_every_kind_once() {
        let unique: HashSet<ChartKind> = ChartKind::ALL.iter().copied().collect();
        assert_eq!(unique.len(), ChartKind::ALL.len());

        let titles: HashSet<&str> = ChartKind::ALL.iter().map(|k| k.title()).collect();
        assert_eq!(titles.len(), ChartKind::ALL.len());
    }

    #[test]
    fn categories_partition_the_catalogue() {
        let total: usize = ChartCategory::ALL.iter().map(|c| c.kinds().count()).sum();
        assert_eq!(total, ChartKind::ALL.len());
        assert!(ChartCategory::ALL.iter().all(|c| c.kinds().count() > 0));
    }

    #[test]
    fn live_kinds_are_financial_or_weather() {
        let live: Vec<ChartKind> = ChartKind::ALL.iter().copied().filter(|k| k.is_live()).collect();
        assert_eq!(live.len(), 4);
        assert!(live.contains(&ChartKind::TemperatureRange));
    }
}

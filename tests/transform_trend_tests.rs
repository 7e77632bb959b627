use pane_rs::core::{ChartDataPoint, Color};
use pane_rs::indicator::{
    ColorMode, IndicatorOutput, SeriesDescriptor, SeriesId, StyleOverrides, transform,
};

fn trend_output(timestamps: Vec<i64>, values: Vec<Option<f64>>) -> IndicatorOutput {
    let mut output = IndicatorOutput {
        timestamps,
        ..IndicatorOutput::default()
    };
    output.data.insert("supertrend".to_owned(), values);
    output.metadata.color_mode = ColorMode::Trend;
    output
        .metadata
        .series_metadata
        .push(SeriesDescriptor::new("supertrend", Color::rgb(0.1, 0.5, 0.9)));
    output
}

#[test]
fn reversal_produces_bridged_up_and_down_segments() {
    let output = trend_output(vec![100, 200, 300], vec![Some(1.0), Some(2.0), Some(1.0)]);
    let result = transform(&output, &StyleOverrides::default(), None);

    let main = result.derived.main_series.expect("up segment is main");
    assert_eq!(main.id, SeriesId::field("supertrend"));
    assert_eq!(
        main.data,
        vec![
            ChartDataPoint::new(100, 1.0),
            ChartDataPoint::new(200, 2.0)
        ]
    );
    assert_eq!(main.color, output.metadata.color_schemes.bullish());

    assert_eq!(result.derived.additional_series.len(), 1);
    let down = &result.derived.additional_series[0];
    assert_eq!(down.id, SeriesId::trend_down("supertrend"));
    assert_eq!(
        down.data,
        vec![
            ChartDataPoint::new(200, 2.0),
            ChartDataPoint::new(300, 1.0)
        ]
    );
    assert_eq!(down.color, output.metadata.color_schemes.bearish());
}

#[test]
fn boundary_point_belongs_to_exactly_two_segments() {
    let output = trend_output(
        vec![100, 200, 300, 400],
        vec![Some(1.0), Some(2.0), Some(2.0), Some(3.0)],
    );
    let result = transform(&output, &StyleOverrides::default(), None);

    let mut memberships = vec![0_usize; 4];
    let mut count = |data: &[ChartDataPoint]| {
        for point in data {
            let index = (point.time / 100 - 1) as usize;
            memberships[index] += 1;
        }
    };
    if let Some(main) = &result.derived.main_series {
        count(&main.data);
    }
    for series in &result.derived.additional_series {
        count(&series.data);
    }

    // up: (100,200); neutral: (200,300); up again: (300,400). Boundary
    // points 200 and 300 bridge two segments each; nothing appears thrice.
    assert_eq!(memberships, vec![1, 2, 2, 1]);
}

#[test]
fn monotonic_series_yields_main_only() {
    let output = trend_output(
        vec![100, 200, 300],
        vec![Some(1.0), Some(2.0), Some(3.0)],
    );
    let result = transform(&output, &StyleOverrides::default(), None);

    assert!(result.derived.additional_series.is_empty());
    let main = result.derived.main_series.expect("up segment");
    assert_eq!(main.data.len(), 3);
}

#[test]
fn downtrend_without_up_points_reports_no_main_series() {
    let output = trend_output(
        vec![100, 200, 300],
        vec![Some(3.0), Some(2.0), Some(1.0)],
    );
    let result = transform(&output, &StyleOverrides::default(), None);

    assert!(result.derived.main_series.is_none());
    assert_eq!(result.derived.additional_series.len(), 1);
    assert_eq!(
        result.derived.additional_series[0].id,
        SeriesId::trend_down("supertrend")
    );
}

#[test]
fn nulls_are_filtered_before_direction_computation() {
    let output = trend_output(
        vec![100, 200, 300, 400],
        vec![Some(1.0), None, Some(2.0), Some(3.0)],
    );
    let result = transform(&output, &StyleOverrides::default(), None);

    let main = result.derived.main_series.expect("up segment");
    let times: Vec<i64> = main.data.iter().map(|p| p.time).collect();
    assert_eq!(times, vec![100, 300, 400]);
}

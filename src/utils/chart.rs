//! Терминальная визуализация: линейный график факт/прогноз
//!
//! График рисуется символами в текстовой сетке: по оси X - дни
//! тестовой выборки, по оси Y - цена. Две серии накладываются
//! друг на друга, пересечения помечаются отдельным символом.

/// Высота сетки графика в строках
const CHART_HEIGHT: usize = 20;

/// Максимальная ширина графика в символах
const CHART_WIDTH: usize = 100;

/// Маркер фактической цены
const ACTUAL_MARKER: char = 'o';

/// Маркер прогноза
const PREDICTED_MARKER: char = '*';

/// Маркер совпадения серий в одной клетке
const OVERLAP_MARKER: char = '#';

/// Строит текстовый линейный график двух серий
///
/// Возвращает готовую многострочную строку с заголовком,
/// подписями оси Y и легендой.
pub fn render_comparison_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    actual: &[f64],
    predicted: &[f64],
) -> String {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return format!("{}\n(нет данных для графика)\n", title);
    }

    let width = n.min(CHART_WIDTH);

    // Даунсэмплинг, если точек больше ширины графика
    let sample = |series: &[f64], col: usize| -> f64 {
        let idx = col * (n - 1) / width.max(1).saturating_sub(1).max(1);
        series[idx.min(n - 1)]
    };

    let min_val = actual
        .iter()
        .chain(predicted.iter())
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let max_val = actual
        .iter()
        .chain(predicted.iter())
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    let range = if (max_val - min_val).abs() < 1e-10 {
        1.0
    } else {
        max_val - min_val
    };

    // Сетка: grid[row][col], строка 0 - верх графика
    let mut grid = vec![vec![' '; width]; CHART_HEIGHT];

    let row_of = |value: f64| -> usize {
        let normalized = (value - min_val) / range;
        let row = ((1.0 - normalized) * (CHART_HEIGHT - 1) as f64).round() as usize;
        row.min(CHART_HEIGHT - 1)
    };

    for col in 0..width {
        let a_row = row_of(sample(actual, col));
        let p_row = row_of(sample(predicted, col));

        grid[a_row][col] = ACTUAL_MARKER;
        grid[p_row][col] = if a_row == p_row {
            OVERLAP_MARKER
        } else {
            PREDICTED_MARKER
        };
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');
    out.push_str(y_label);
    out.push('\n');

    for (row_idx, row) in grid.iter().enumerate() {
        // Подписи цены сверху, посередине и снизу
        let label = if row_idx == 0 {
            format!("{:>10.0} |", max_val)
        } else if row_idx == CHART_HEIGHT / 2 {
            format!("{:>10.0} |", (max_val + min_val) / 2.0)
        } else if row_idx == CHART_HEIGHT - 1 {
            format!("{:>10.0} |", min_val)
        } else {
            format!("{:>10} |", "")
        };

        out.push_str(&label);
        out.extend(row.iter());
        out.push('\n');
    }

    out.push_str(&format!("{:>10} +{}\n", "", "-".repeat(width)));
    out.push_str(&format!("{:>12}{}\n", "", x_label));
    out.push('\n');
    out.push_str(&format!(
        "Легенда: {} факт   {} прогноз   {} совпадение\n",
        ACTUAL_MARKER, PREDICTED_MARKER, OVERLAP_MARKER
    ));

    out
}

/// Рисует график сравнения в stdout
pub fn print_comparison_chart(title: &str, actual: &[f64], predicted: &[f64]) {
    let chart = render_comparison_chart(
        title,
        "День тестовой выборки",
        "Цена, USDT",
        actual,
        predicted,
    );
    println!("{}", chart);
}

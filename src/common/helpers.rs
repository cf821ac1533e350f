/// 소수점 `decimals` 자리에서 반올림 (round-half-to-even)
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

/// 확률(0~1)을 백분율로 변환 후 반올림
pub fn percent(probability: f64, decimals: u32) -> f64 {
    round_half_even(probability * 100.0, decimals)
}

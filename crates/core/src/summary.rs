//! Currency formatting and the copyable estimate summary.
//!
//! The summary block is what customers paste into LINE or mail, so its
//! line order is fixed and rendering is a pure function of the result.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::pricing::QuoteResult;

/// Floors to whole yen and applies comma thousands grouping.
pub fn format_yen(amount: Decimal) -> String {
    let whole = amount.floor().to_i64().unwrap_or(0);
    format!("{}円", group_thousands(whole))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && index % 3 == lead % 3 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders the fixed-order LINE/mail summary for a priced estimate.
/// Deterministic for a given result; the reservation id was generated
/// when the quote was computed and is only echoed here.
pub fn build_summary_text(result: &QuoteResult) -> String {
    let mut lines = Vec::new();
    lines.push("【見積｜運ぶ・移動｜軽貨物TAKE】".to_string());
    lines.push(format!("予約ID：{}", result.reservation_id));
    lines.push(format!("サービス：{}", result.service.label()));
    lines.push(format!("車両台数：{}台（走行分×{}）", result.vans, result.vans));

    let origin = result.origin.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let destination = result.destination.as_deref().map(str::trim).filter(|s| !s.is_empty());
    if origin.is_some() || destination.is_some() {
        lines.push(format!(
            "積地：{} / 卸地：{}",
            origin.unwrap_or("(未入力)"),
            destination.unwrap_or("(未入力)")
        ));
    }

    lines.push(format!("距離：{}km", result.distance_km));
    lines.push(format!(
        "出張費：{}（{}）",
        format_yen(result.travel_fee.fee),
        result.travel_fee.note
    ));
    if let Some(scheduled_at) = result.scheduled_at.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("希望日時：{scheduled_at}"));
    }
    if let Some(note) = result.note.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("補足：{note}"));
    }

    lines.push("—".to_string());
    lines.push(format!(
        "走行分（基本＋出張）×台数：{}（基本{} + 出張{}）×{}",
        format_yen(result.drive_part),
        format_yen(result.base_fee),
        format_yen(result.travel_fee.fee),
        result.vans
    ));
    if result.stairs_fee > Decimal::ZERO {
        lines.push(format!("階段付帯：{}", format_yen(result.stairs_fee)));
    }
    if result.labor_fee > Decimal::ZERO {
        lines.push(format!(
            "追加人件費：{}（{}人 × {}h × {}）",
            format_yen(result.labor_fee),
            result.workers,
            result.worker_hours,
            format_yen(result.extra_labor_per_hour)
        ));
    }
    lines.push(format!("合計：{}（税込概算）", format_yen(result.total)));
    lines.push("—".to_string());
    lines.push("確定：LINE/メールで相談→合意後に本契約へ".to_string());
    lines.push("支払い：当日決済（現金/振込）".to_string());

    lines.join("\n")
}

// Plain-text dashboard printed to stdout
use crate::calculator::CalculatorState;
use crate::dashboard::DashboardView;
use crate::display::DisplaySurface;
use crate::model::{BaseRateInfo, DepositRate, SpecialOffer};
use crate::utils::{format_won, group_thousands, parse_date};
use chrono::{Local, NaiveDate};
use std::fmt::Write;

pub const APP_TITLE: &str = "금리 정보 알리미";

const FOOTER: [&str; 2] = [
    "모든 금융상품 정보는 참고용입니다.",
    "실제 상품 가입 전 반드시 해당 금융기관의 설명을 확인하시기 바랍니다.",
];

pub struct ConsoleDisplay;

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self
    }

    /// Builds the whole screen; `today` decides which offers read as expired.
    pub fn render_to_string(&self, view: &DashboardView<'_>, today: NaiveDate) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "==== {} ====", APP_TITLE);

        if view.is_loading {
            out.push_str("불러오는 중...\n");
        } else if let Some(error) = view.error {
            let _ = writeln!(out, "{}", error);
        } else {
            write_content(&mut out, view, today);
        }

        out.push('\n');
        for line in FOOTER {
            let _ = writeln!(out, "{}", line);
        }
        out
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for ConsoleDisplay {
    fn render(&self, view: &DashboardView<'_>) {
        print!("{}", self.render_to_string(view, Local::now().date_naive()));
    }
}

fn write_content(out: &mut String, view: &DashboardView<'_>, today: NaiveDate) {
    if let Some(base) = view.base_rate {
        write_base_rate(out, base);
    }

    out.push_str("\n[은행 예금금리 TOP 3]\n");
    write_rates(out, view.commercial_rates, view.selected_rate, "은행 예금 금리 정보가 없습니다.");

    out.push_str("\n[저축은행 예금금리 TOP 3]\n");
    write_rates(out, view.savings_rates, view.selected_rate, "저축은행 예금 금리 정보가 없습니다.");

    out.push_str("\n[예상 이자 계산기]\n");
    write_calculator(out, view.calculator);

    out.push_str("\n[특판/이벤트 알림]\n");
    if view.special_offers.is_empty() {
        out.push_str("  진행중인 특판/이벤트 정보가 없습니다.\n");
    }
    for offer in view.special_offers {
        write_offer(out, offer, view.alarms.is_active(&offer.id), today);
    }
    let active = view.alarms.active_ids();
    if !active.is_empty() {
        let _ = writeln!(out, "  설정된 알림: {}", active.join(", "));
    }
}

fn write_base_rate(out: &mut String, base: &BaseRateInfo) {
    let _ = writeln!(out, "\n[한국은행 기준금리] {:.2}%", base.rate);
    if let Some(change) = base.change {
        let arrow = if change > 0.0 {
            "▲"
        } else if change < 0.0 {
            "▼"
        } else {
            ""
        };
        let _ = writeln!(out, "  변동: {} {:.2}%", arrow, change.abs());
    }
    let _ = writeln!(
        out,
        "  (기준일: {}, 최종 업데이트: {})",
        base.effective_date.as_deref().unwrap_or("-"),
        base.last_updated
    );
}

fn write_rates(out: &mut String, rates: &[DepositRate], selected: Option<&DepositRate>, empty: &str) {
    if rates.is_empty() {
        let _ = writeln!(out, "  {}", empty);
        return;
    }
    for (rank, rate) in rates.iter().enumerate() {
        let marker = if selected.is_some_and(|s| s.id == rate.id) { "*" } else { " " };
        let _ = writeln!(
            out,
            "{} {}. {} - {} {:.2}% (연, 세전) [{}]",
            marker,
            rank + 1,
            rate.bank_name,
            rate.product_name,
            rate.rate,
            rate.id
        );
        if let Some(conditions) = &rate.conditions {
            let _ = writeln!(out, "     조건: {}", conditions);
        }
        if let Some(months) = rate.min_duration_months {
            let _ = writeln!(out, "     최소 가입기간: {}개월", months);
        }
        if let Some(max) = rate.max_amount {
            let _ = writeln!(out, "     최대 예치금액: {}원", group_thousands(max as i64));
        }
    }
}

fn write_calculator(out: &mut String, calc: &CalculatorState) {
    match calc.selection() {
        Some(s) => {
            let _ = writeln!(out, "  적용금리: {} - {} ({:.2}%)", s.bank_name, s.product_name, s.rate);
        }
        None => out.push_str("  적용금리: 금리 정보를 불러오는 중...\n"),
    }
    let _ = writeln!(
        out,
        "  예치금액: {} | 기간: {}년 | 방식: {}",
        format_won(calc.principal()),
        calc.period_years(),
        calc.method()
    );

    if let Some(quote) = calc.quote() {
        let _ = writeln!(
            out,
            "  예상 이자 (세전, {}년, {}): {}",
            quote.period_years,
            quote.method,
            format_won(Some(quote.interest))
        );
        let _ = writeln!(
            out,
            "  총 예상 수령액: {} (원금 {} + 이자 {})",
            format_won(Some(quote.total_payout)),
            format_won(Some(quote.principal)),
            format_won(Some(quote.interest))
        );
    }
    out.push_str("  본 계산 결과는 참고용입니다. 실제 이자액은 세금(일반과세 15.4%) 및 기타 조건에 따라 달라질 수 있습니다.\n");
}

fn write_offer(out: &mut String, offer: &SpecialOffer, alarm_on: bool, today: NaiveDate) {
    let bell = if alarm_on { "[알림 ON]" } else { "[알림 OFF]" };
    let _ = writeln!(out, "  {} {} - {} [{}]", bell, offer.title, offer.bank_name, offer.id);
    if let Some(rate) = offer.rate {
        let _ = writeln!(out, "     최대 연 {:.2}%", rate);
    }
    let _ = writeln!(out, "     {}", offer.description);
    if let Some(end) = &offer.end_date {
        let expired = parse_date(end).is_some_and(|d| d < today);
        let _ = writeln!(out, "     기한: ~{}{}", end, if expired { " (종료)" } else { "" });
    }
    if let Some(link) = &offer.link {
        let _ = writeln!(out, "     자세히 보기: {}", link);
    }
    if alarm_on {
        out.push_str("     이 특판 상품 알림이 설정되었습니다.\n");
    }
}

mod common;

use azan_clock::models::Connectivity;
use azan_clock::prayer_times::{Applied, Controller};
use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use common::{local_fetcher, serve};

fn local(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
    let tz = FixedOffset::east_opt(3 * 3600).unwrap();
    tz.with_ymd_and_hms(2026, 10, 16, h, m, s).single().unwrap()
}

#[tokio::test]
async fn test_fetch_select_countdown_and_refresh() {
    let (url, requests) = serve("200 OK", r#"{"Fajir":"5:00am","Duhur":"1:15pm"}"#).await;
    let fetcher = local_fetcher(url);
    let mut controller = Controller::new();

    let start = local(13, 14, 0);
    let seq = controller.begin_refresh(false);
    assert_eq!(controller.state().connectivity, Connectivity::Refreshing);
    let applied = controller.apply(seq, fetcher.fetch_times().await, &start);

    assert_eq!(applied, Applied::Updated);
    assert_eq!(controller.state().connectivity, Connectivity::Online);
    assert_eq!(controller.state().next_label(), Some("Duhur"));
    assert_eq!(controller.state().next_time_text(), Some("1:15pm"));

    let first = controller.tick(&start);
    assert_eq!(first.countdown.as_deref(), Some("00:01:00"));
    assert!(!first.refresh_due);

    // One tick per second down to the prayer time.
    let mut shown = Vec::new();
    let mut due_at = None;
    for s in 1..=60 {
        let tick = controller.tick(&(start + Duration::seconds(s)));
        if tick.refresh_due && due_at.is_none() {
            due_at = Some(s);
        }
        shown.push(tick.countdown.unwrap());
    }
    assert_eq!(shown.first().map(String::as_str), Some("00:00:59"));
    assert_eq!(shown[58], "00:00:01");
    assert_eq!(shown.last().map(String::as_str), Some("00:00:00"));
    assert!(shown.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(due_at, Some(59));

    // The triggered refresh rolls Duhur over to tomorrow, so Fajir is next.
    let now = local(13, 15, 0);
    let seq = controller.begin_refresh(true);
    let applied = controller.apply(seq, fetcher.fetch_times().await, &now);
    assert_eq!(applied, Applied::Updated);
    assert_eq!(controller.state().next_label(), Some("Fajir"));
    assert_eq!(controller.state().next.as_ref().unwrap().at, local(5, 0, 0) + Duration::days(1));
    assert_eq!(controller.tick(&now).countdown.as_deref(), Some("15:45:00"));

    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_outage_keeps_last_good_times() {
    let (good_url, _) = serve("200 OK", r#"{"Asr":"3:45pm","Maghrib":"5:30pm"}"#).await;
    let (bad_url, _) = serve("500 Internal Server Error", "").await;
    let good = local_fetcher(good_url);
    let bad = local_fetcher(bad_url);
    let mut controller = Controller::new();

    let seq = controller.begin_refresh(true);
    controller.apply(seq, good.fetch_times().await, &local(12, 0, 0));

    let seq = controller.begin_refresh(true);
    let applied = controller.apply(seq, bad.fetch_times().await, &local(12, 1, 0));

    assert_eq!(applied, Applied::Failed);
    let state = controller.state();
    assert_eq!(state.connectivity, Connectivity::Offline);
    assert!(state.error.is_some());
    assert_eq!(state.next_label(), Some("Asr"));
    assert_eq!(state.current_data.as_ref().unwrap().len(), 2);

    // Manual retry once the server is back.
    let seq = controller.begin_refresh(false);
    assert!(controller.state().error.is_none());
    let applied = controller.apply(seq, good.fetch_times().await, &local(12, 2, 0));
    assert_eq!(applied, Applied::Updated);
    assert_eq!(controller.state().connectivity, Connectivity::Online);
}

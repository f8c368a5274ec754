//! 日次ダイジェストのスケジューラ
//!
//! cron 式（ローカル時刻）の次回時刻まで眠り、RunDailyDigest::run を blocking スレッドで実行する。
//! 1 回の失敗はログに残して次回を待つ。

use crate::ports::inbound::RunDailyDigest;
use chrono::{DateTime, Local, TimeZone};
use common::error::Error;
use cron::Schedule;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// `now` より後の最初の発火時刻
pub fn next_fire_after<Z: TimeZone>(schedule: &Schedule, now: &DateTime<Z>) -> Option<DateTime<Z>> {
    schedule.after(now).next()
}

/// ダイジェストを 1 回実行する
pub async fn run_digest_once(digest: Arc<dyn RunDailyDigest>) -> Result<(), Error> {
    match tokio::task::spawn_blocking(move || digest.run()).await {
        Ok(result) => result,
        Err(e) => Err(Error::system(format!("daily digest task failed: {}", e))),
    }
}

/// shutdown が完了するまで発火し続ける
pub async fn run_daily_scheduler<F>(schedule: Schedule, digest: Arc<dyn RunDailyDigest>, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        let now = Local::now();
        let Some(next) = next_fire_after(&schedule, &now) else {
            tracing::warn!("cron expression has no upcoming fire time; scheduler stopped");
            return;
        };
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        tracing::info!(next = %next, "next daily digest scheduled");

        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("daily scheduler stopped");
                return;
            }
            _ = tokio::time::sleep(wait) => {}
        }

        match run_digest_once(Arc::clone(&digest)).await {
            Ok(()) => tracing::info!("daily digest posted"),
            Err(e) => tracing::error!(error = %e, "daily digest failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::A2AResponse;
    use chrono::Utc;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct CountingDigest {
        runs: AtomicUsize,
        fail: bool,
        notify: Arc<Notify>,
    }

    impl RunDailyDigest for CountingDigest {
        fn compose(&self) -> Result<A2AResponse, Error> {
            Err(Error::system("not used"))
        }

        fn run(&self) -> Result<(), Error> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            self.notify.notify_one();
            if self.fail {
                Err(Error::http("webhook down"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_next_fire_is_next_seven_am() {
        let schedule = Schedule::from_str("0 0 7 * * *").unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let next = next_fire_after(&schedule, &now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 10, 20, 7, 0, 0).unwrap());

        let early = Utc.with_ymd_and_hms(2026, 10, 19, 6, 59, 59).unwrap();
        assert_eq!(
            next_fire_after(&schedule, &early).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 19, 7, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_loop() {
        let notify = Arc::new(Notify::new());
        let digest = Arc::new(CountingDigest {
            runs: AtomicUsize::new(0),
            fail: true,
            notify: Arc::clone(&notify),
        });
        let schedule = Schedule::from_str("* * * * * *").unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(run_daily_scheduler(
            schedule,
            digest.clone() as Arc<dyn RunDailyDigest>,
            async move {
                let _ = stop_rx.await;
            },
        ));

        for _ in 0..2 {
            tokio::time::timeout(Duration::from_secs(5), notify.notified())
                .await
                .expect("digest should run every second");
        }
        let _ = stop_tx.send(());
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("scheduler should stop")
            .unwrap();
        assert!(digest.runs.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_run_digest_once_propagates_error() {
        let digest = Arc::new(CountingDigest {
            runs: AtomicUsize::new(0),
            fail: true,
            notify: Arc::new(Notify::new()),
        });
        let err = run_digest_once(digest).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}

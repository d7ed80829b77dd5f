//! Integration tests for repository implementations.

use chrono::NaiveDate;
use std::sync::Arc;

use occupancy_rust::core::{Interval, RentalDetails, Window};
use occupancy_rust::db::{LocalRepository, RentalRepository, RepositoryError};
use occupancy_rust::services::{get_occupancy_timeline, TimelineQuery};
use occupancy_rust::transformations::RentalFilter;

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, day).unwrap()
}

fn rental(id: &str, subject: &str, start: NaiveDate, end: NaiveDate, status: &str) -> Interval {
    Interval::new(id, subject, start, end).with_details(RentalDetails {
        status: Some(status.to_string()),
        subject_code: Some(format!("SUP-{}", subject)),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_repository_health_check() {
    let repo: Arc<dyn RentalRepository> = Arc::new(LocalRepository::new());
    let result = repo.health_check().await;
    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[tokio::test]
async fn test_store_and_fetch_rentals() {
    let repo = LocalRepository::new();

    let stored = repo
        .store_rentals(vec![
            rental("1", "A", d(1, 1), d(2, 29), "active"),
            rental("2", "B", d(3, 1), d(3, 31), "reserved"),
        ])
        .await
        .unwrap();
    assert_eq!(stored, 2);
    assert_eq!(repo.rental_count().await.unwrap(), 2);

    let window = Window::new(d(2, 1), d(2, 29)).unwrap();
    let found = repo
        .fetch_rentals(&window, &RentalFilter::default())
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "1");
}

#[tokio::test]
async fn test_fetch_with_status_filter() {
    let repo = LocalRepository::with_rentals(vec![
        rental("1", "A", d(1, 1), d(1, 31), "active"),
        rental("2", "A", d(1, 15), d(2, 15), "reserved"),
    ])
    .unwrap();

    let window = Window::calendar_year(2024).unwrap();
    let filter = RentalFilter::new(None, Some("reserved".into()));
    let found = repo.fetch_rentals(&window, &filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "2");
}

#[tokio::test]
async fn test_unhealthy_repository_fails_timeline() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    let query = TimelineQuery::new(Window::calendar_year(2024).unwrap());
    let err = get_occupancy_timeline(&repo, &query).await.unwrap_err();
    assert!(!err.is_caller_error());
    assert!(err.to_string().contains("not healthy"));
}

#[tokio::test]
async fn test_clear_keeps_health() {
    let repo = LocalRepository::with_rentals(vec![rental("1", "A", d(1, 1), d(1, 2), "active")])
        .unwrap();
    repo.clear();
    assert!(repo.is_empty());
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_concurrent_writers() {
    let repo = Arc::new(LocalRepository::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.store_rentals(vec![rental(
                    &format!("r{}", i),
                    "A",
                    d(1, 1),
                    d(1, 31),
                    "active",
                )])
                .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(repo.rental_count().await.unwrap(), 8);

    let err = repo
        .store_rentals(vec![rental("", "A", d(1, 1), d(1, 2), "active")])
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

use crate::database::{
    model::event::{EventCapacityRow, EventRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{
        event::{BookEvent, CancelBooking},
        Event,
    },
    id::EventId,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

// 参加者は登録順に集約する。主催者名は作成時に保存した値を返す
const SELECT_EVENTS: &str = r#"
    SELECT
        e.event_id,
        e.title,
        e.description,
        e.event_date,
        e.event_time,
        e.location,
        e.price,
        e.category,
        e.image_url,
        e.capacity,
        e.organizer_id,
        e.organizer_name,
        COALESCE(
            array_agg(a.attendee_id ORDER BY a.booked_at, a.attendee_id)
                FILTER (WHERE a.attendee_id IS NOT NULL),
            '{}'::uuid[]
        ) AS attendees
    FROM events AS e
    LEFT JOIN attendees AS a ON a.event_id = e.event_id
"#;

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let sql = format!("{SELECT_EVENTS} GROUP BY e.event_id ORDER BY e.created_at ASC");
        sqlx::query_as::<_, EventRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        fetch_event(self.db.inner_ref(), event_id)
            .await?
            .map(Event::try_from)
            .transpose()
    }

    async fn create(&self, event: Event) -> AppResult<Event> {
        let res = sqlx::query(
            r#"
                INSERT INTO events
                (event_id, title, description, event_date, event_time,
                location, price, category, image_url, capacity, organizer_id,
                organizer_name)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(event.price)
        .bind(event.category.as_ref())
        .bind(&event.image_url)
        .bind(event.capacity)
        .bind(event.organizer_id)
        .bind(&event.organizer_name)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        self.reload(event.id).await
    }

    async fn update(&self, event: Event) -> AppResult<Event> {
        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    title = $2,
                    description = $3,
                    event_date = $4,
                    event_time = $5,
                    location = $6,
                    price = $7,
                    category = $8,
                    image_url = $9,
                    capacity = $10,
                    updated_at = CURRENT_TIMESTAMP(3)
                WHERE event_id = $1
            "#,
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(event.price)
        .bind(event.category.as_ref())
        .bind(&event.image_url)
        .bind(event.capacity)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Event not found".into()));
        }

        self.reload(event.id).await
    }

    async fn delete(&self, event_id: EventId) -> AppResult<()> {
        // attendees は ON DELETE CASCADE で一緒に消える
        let res = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Event not found".into()));
        }

        Ok(())
    }

    async fn add_attendee(&self, event: BookEvent) -> AppResult<Event> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        // キャッシュ上のチェックとは別に、ここでも定員と重複を確かめる。
        // 複数クライアントが同時に最後の 1 枠を取りに来た場合はこちらが正となる
        {
            let state: Option<EventCapacityRow> = sqlx::query_as(
                r#"
                    SELECT
                        e.capacity,
                        (SELECT COUNT(*) FROM attendees WHERE event_id = e.event_id) AS attendee_count,
                        EXISTS (
                            SELECT 1 FROM attendees
                            WHERE event_id = e.event_id AND attendee_id = $2
                        ) AS already_booked
                    FROM events AS e
                    WHERE e.event_id = $1
                    FOR UPDATE
                "#,
            )
            .bind(event.event_id)
            .bind(event.attendee_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let Some(state) = state else {
                return Err(AppError::EntityNotFound("Event not found".into()));
            };
            if state.attendee_count >= i64::from(state.capacity) {
                return Err(AppError::CapacityExceeded);
            }
            if state.already_booked {
                return Err(AppError::AlreadyBooked);
            }
        }

        let res = sqlx::query("INSERT INTO attendees (event_id, attendee_id) VALUES ($1, $2)")
            .bind(event.event_id)
            .bind(event.attendee_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No attendee record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        self.reload(event.event_id).await
    }

    async fn remove_attendee(&self, event: CancelBooking) -> AppResult<Event> {
        let res = sqlx::query("DELETE FROM attendees WHERE event_id = $1 AND attendee_id = $2")
            .bind(event.event_id)
            .bind(event.attendee_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NotBooked);
        }

        self.reload(event.event_id).await
    }
}

impl EventRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    // 書き込み後のレコードを読み直して返す
    async fn reload(&self, event_id: EventId) -> AppResult<Event> {
        fetch_event(self.db.inner_ref(), event_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound("Event not found".into()))
            .and_then(Event::try_from)
    }
}

async fn fetch_event<'e, E>(executor: E, event_id: EventId) -> AppResult<Option<EventRow>>
where
    E: sqlx::PgExecutor<'e>,
{
    let sql = format!("{SELECT_EVENTS} WHERE e.event_id = $1 GROUP BY e.event_id");
    sqlx::query_as::<_, EventRow>(&sql)
        .bind(event_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::SpecificOperationError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use chrono::NaiveDate;
    use kernel::model::{
        event::EventCategory,
        id::UserId,
        role::Role,
        user::{
            event::{CreateUser, UpdateProfile},
            User, UserProfile,
        },
    };
    use kernel::repository::user::UserRepository;

    async fn register(db: &ConnectionPool, name: &str, role: Role) -> anyhow::Result<User> {
        let repo = UserRepositoryImpl::new(db.clone());
        let user = repo
            .create(CreateUser::new(
                name.into(),
                format!("{name}@example.com"),
                "secret-password".into(),
                role,
                UserProfile::default(),
            ))
            .await?;
        Ok(user)
    }

    fn new_event(organizer: &User, capacity: i32) -> Event {
        Event {
            id: EventId::new(),
            title: "Jazz Night".into(),
            description: "An evening of live jazz".into(),
            date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
            time: "19:30".into(),
            location: "Blue Room".into(),
            price: 25.0,
            category: EventCategory::Music,
            image_url: String::new(),
            capacity,
            organizer_id: organizer.id,
            organizer_name: organizer.name.clone(),
            attendees: vec![],
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_register_and_book_event(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let repo = EventRepositoryImpl::new(db.clone());
        let olivia = register(&db, "olivia", Role::Organizer).await?;
        let sam = register(&db, "sam", Role::Attendee).await?;
        let ann = register(&db, "ann", Role::Attendee).await?;

        let created = repo.create(new_event(&olivia, 1)).await?;
        assert_eq!(created.organizer_name, "olivia");
        assert!(created.attendees.is_empty());

        let booked = repo.add_attendee(BookEvent::new(created.id, sam.id)).await?;
        assert_eq!(booked.attendees, vec![sam.id]);

        let res = repo.add_attendee(BookEvent::new(created.id, ann.id)).await;
        assert!(matches!(res, Err(AppError::CapacityExceeded)));

        let cancelled = repo
            .remove_attendee(CancelBooking::new(created.id, sam.id))
            .await?;
        assert!(cancelled.attendees.is_empty());

        let res = repo
            .remove_attendee(CancelBooking::new(created.id, UserId::new()))
            .await;
        assert!(matches!(res, Err(AppError::NotBooked)));

        repo.delete(created.id).await?;
        assert!(repo.find_by_id(created.id).await?.is_none());
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_keeps_attendees(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let repo = EventRepositoryImpl::new(db.clone());
        let olivia = register(&db, "olivia", Role::Organizer).await?;
        let sam = register(&db, "sam", Role::Attendee).await?;

        let created = repo.create(new_event(&olivia, 5)).await?;
        repo.add_attendee(BookEvent::new(created.id, sam.id)).await?;

        let updated = repo
            .update(Event {
                title: "Late Jazz Night".into(),
                attendees: vec![],
                ..created
            })
            .await?;
        assert_eq!(updated.title, "Late Jazz Night");
        assert_eq!(updated.attendees, vec![sam.id]);
        assert_eq!(repo.find_all().await?.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_organizer_name_is_kept_after_rename(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let repo = EventRepositoryImpl::new(db.clone());
        let olivia = register(&db, "olivia", Role::Organizer).await?;
        let sam = register(&db, "sam", Role::Attendee).await?;
        let created = repo.create(new_event(&olivia, 5)).await?;

        UserRepositoryImpl::new(db.clone())
            .update_profile(UpdateProfile {
                user_id: olivia.id,
                name: Some("Olivia Renamed".into()),
                profile_image: None,
                gender: None,
                city: None,
                interests: None,
                age: None,
                budget: None,
            })
            .await?;

        let booked = repo.add_attendee(BookEvent::new(created.id, sam.id)).await?;
        assert_eq!(booked.organizer_name, "olivia");
        let listed = repo.find_all().await?;
        assert_eq!(listed[0].organizer_name, "olivia");
        Ok(())
    }
}

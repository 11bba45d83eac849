use rusqlite::Connection;

use crate::domain::RepositoryError;

pub(super) fn run(conn: &Connection) -> Result<(), RepositoryError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS messages (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            sender_id    INTEGER NOT NULL,
            receiver_id  INTEGER NOT NULL,
            content      TEXT NOT NULL,
            timestamp    INTEGER NOT NULL,
            is_read      INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_messages_pair
            ON messages(sender_id, receiver_id, timestamp);

        CREATE INDEX IF NOT EXISTS idx_messages_receiver
            ON messages(receiver_id, timestamp);

        CREATE TABLE IF NOT EXISTS notifications (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       INTEGER NOT NULL,
            type          TEXT NOT NULL CHECK (type IN
                              ('message', 'comment', 'like', 'friend_request', 'friend_accepted')),
            message       TEXT NOT NULL,
            from_user_id  INTEGER,
            post_id       INTEGER,
            comment_id    INTEGER,
            is_read       INTEGER NOT NULL DEFAULT 0,
            created_at    INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_user
            ON notifications(user_id, created_at);
        ",
    )?;

    tracing::info!("Database migrations complete");
    Ok(())
}

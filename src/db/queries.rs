use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{ChatMessage, Meeting, MeetingStatus, User};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

fn parse_ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TS_FORMAT).unwrap_or_else(|e| {
        tracing::warn!(value = s, error = %e, "malformed stored timestamp, using current time");
        Utc::now().naive_utc()
    })
}

// ── Users ──

/// Inserts or refreshes the display name of a user keyed by email.
pub fn create_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (email, name, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(email) DO UPDATE SET name = excluded.name",
        params![user.email, user.name, format_ts(&user.created_at)],
    )?;
    Ok(())
}

pub fn list_users(conn: &Connection) -> anyhow::Result<Vec<User>> {
    let mut stmt =
        conn.prepare("SELECT name, email, created_at FROM users ORDER BY created_at ASC, email ASC")?;

    let rows = stmt.query_map([], |row| {
        let created_at: String = row.get(2)?;
        Ok(User {
            name: row.get(0)?,
            email: row.get(1)?,
            created_at: parse_ts(&created_at),
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ── Chats ──

pub fn insert_chat_message(conn: &Connection, msg: &ChatMessage) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO chats (user_name, user_email, message, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![
            msg.sender_name,
            msg.sender_contact,
            msg.body,
            format_ts(&msg.sent_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The full log, oldest first.
pub fn list_chat_messages(conn: &Connection) -> anyhow::Result<Vec<ChatMessage>> {
    let mut stmt = conn.prepare(
        "SELECT user_name, user_email, message, timestamp FROM chats ORDER BY timestamp ASC, id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let timestamp: String = row.get(3)?;
        Ok(ChatMessage {
            sender_name: row.get(0)?,
            sender_contact: row.get(1)?,
            body: row.get(2)?,
            sent_at: parse_ts(&timestamp),
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

// ── Meetings ──

pub fn create_meeting(conn: &Connection, meeting: &Meeting) -> anyhow::Result<()> {
    let participants = serde_json::to_string(&meeting.participants)?;

    conn.execute(
        "INSERT INTO meetings (id, title, proposed_time, timezone, duration_minutes, participants, reasoning, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            meeting.id,
            meeting.title,
            meeting.proposed_time,
            meeting.timezone,
            meeting.duration_minutes,
            participants,
            meeting.reasoning,
            meeting.status.as_str(),
            format_ts(&meeting.created_at),
        ],
    )?;
    Ok(())
}

const MEETING_COLUMNS: &str =
    "id, title, proposed_time, timezone, duration_minutes, participants, reasoning, status, created_at";

fn parse_meeting_row(row: &rusqlite::Row) -> rusqlite::Result<Meeting> {
    let participants_json: String = row.get(5)?;
    let status: String = row.get(7)?;
    let created_at: String = row.get(8)?;

    Ok(Meeting {
        id: row.get(0)?,
        title: row.get(1)?,
        proposed_time: row.get(2)?,
        timezone: row.get(3)?,
        duration_minutes: row.get(4)?,
        participants: serde_json::from_str(&participants_json).unwrap_or_default(),
        reasoning: row.get(6)?,
        status: MeetingStatus::parse(&status),
        created_at: parse_ts(&created_at),
    })
}

/// Newest first.
pub fn list_meetings(conn: &Connection) -> anyhow::Result<Vec<Meeting>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings ORDER BY created_at DESC, rowid DESC"
    ))?;

    let rows = stmt.query_map([], parse_meeting_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn get_meeting(conn: &Connection, id: &str) -> anyhow::Result<Option<Meeting>> {
    let meeting = conn
        .query_row(
            &format!("SELECT {MEETING_COLUMNS} FROM meetings WHERE id = ?1"),
            params![id],
            parse_meeting_row,
        )
        .optional()?;
    Ok(meeting)
}

/// Returns false when no meeting has this id.
pub fn update_meeting_status(
    conn: &Connection,
    id: &str,
    status: &MeetingStatus,
) -> anyhow::Result<bool> {
    let updated = conn.execute(
        "UPDATE meetings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(updated > 0)
}

pub fn clear_all(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch("DELETE FROM users; DELETE FROM chats; DELETE FROM meetings;")?;
    Ok(())
}

// crates/transactor/src/infrastructure/postgres/runners/postgres_copy.rs

use std::ops::DerefMut;

use sqlx::PgConnection;
use sqlx::postgres::PgCopyIn;

use crate::domain::context::Context;
use crate::errors::Result;

/// `COPY "schema"."table" ("a", "b") FROM STDIN` (format texte).
pub(crate) fn copy_statement(table: &[&str], columns: &[&str]) -> String {
    let table = table.iter().map(|part| quote_identifier(part)).collect::<Vec<_>>().join(".");
    let columns = columns
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ");
    format!("COPY {table} ({columns}) FROM STDIN")
}

pub(crate) fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Encode les lignes au format texte de COPY : tabulation entre colonnes,
/// `\N` pour NULL, saut de ligne en fin de ligne.
pub(crate) fn encode_text_rows<I, R, S>(rows: I) -> (Vec<u8>, u64)
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut out = String::new();
    let mut count = 0;
    for row in rows {
        for (index, value) in row.into_iter().enumerate() {
            if index > 0 {
                out.push('\t');
            }
            match value {
                Some(value) => escape_text(value.as_ref(), &mut out),
                None => out.push_str("\\N"),
            }
        }
        out.push('\n');
        count += 1;
    }
    (out.into_bytes(), count)
}

fn escape_text(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
}

/// Envoie `data` puis termine le COPY. En cas d'échec d'envoi, le COPY est
/// abandonné pour rendre la connexion utilisable.
pub(crate) async fn feed<C>(ctx: &Context, mut copy: PgCopyIn<C>, data: &[u8]) -> Result<u64>
where
    C: DerefMut<Target = PgConnection>,
{
    let sent = ctx.run(copy.send(data)).await?.map(|_| ());
    match sent {
        Ok(()) => Ok(ctx.run(copy.finish()).await??),
        Err(err) => {
            if let Err(abort_err) = copy.abort(err.to_string()).await {
                tracing::warn!("COPY abort failed: {}", abort_err);
            }
            Err(err.into())
        }
    }
}

use serde_json::{Value, json};

pub const SEEDED: i64 = 23;

/// Actor rotation: `(name, id)` picked by `id % 4`.
const ACTORS: [(Option<&str>, i64); 4] = [
    (Some("Juan Pérez"), 7),
    (Some("Pedro Gómez"), 8),
    (None, 9),
    (Some("Ana Ruiz"), 10),
];

/// Audit rows as the API serves them, newest first (ids 23 down to 1).
///
/// - `id % 3` picks the action: 0 CREATE, 1 UPDATE, 2 DELETE;
/// - even ids are `Expediente`, odd ids `Acta`;
/// - timestamps are naive `2024-06-<id>T10:00:00`;
/// - creations carry `IdTransaccion = 1000 + id`;
/// - id 5 has a free-text description and id 6 none at all.
pub fn audit_rows() -> Vec<Value> {
    (1..=SEEDED).rev().map(audit_row).collect()
}

pub fn audit_row(id: i64) -> Value {
    let action = match id % 3 {
        0 => "CREATE",
        1 => "UPDATE",
        _ => "DELETE",
    };
    let entity = if id % 2 == 0 { "Expediente" } else { "Acta" };
    let (actor_name, actor_id) = ACTORS[(id % 4) as usize];

    let description = match (id, action) {
        (5, _) => Value::String("Registro migrado del sistema anterior".into()),
        (6, _) => Value::Null,
        (_, "CREATE") => Value::String(
            json!({
                "id": id,
                "data": {"Nombre": format!("Registro {id}"), "IdTransaccion": 1000 + id}
            })
            .to_string(),
        ),
        (_, "UPDATE") => {
            Value::String(json!({"id": id, "changes": {"Estado": "Cerrado"}}).to_string())
        }
        _ => Value::String(json!({"id": id}).to_string()),
    };

    json!({
        "IdAuditoria": id,
        "Accion": action,
        "Entidad": entity,
        "Descripcion": description,
        "AudFecha": format!("2024-06-{id:02}T10:00:00"),
        "AudUsuario": actor_id,
        "UsuarioNombre": actor_name,
    })
}

// --- File: crates/citaflow_mailer/src/templates.rs ---
//! Email texts for appointment confirmations and admin notices.

/// Everything the email bodies mention about an appointment.
pub struct AppointmentDetails<'a> {
    pub nombre: &'a str,
    pub correo: &'a str,
    pub fecha: &'a str,
    pub hora: &'a str,
    pub motivo: &'a str,
}

pub const CONFIRMATION_SUBJECT: &str = "Confirmación de tu cita";
pub const ADMIN_NOTICE_SUBJECT: &str = "Nueva cita registrada";

/// Confirmation email sent to the client.
pub fn confirmation_body(details: &AppointmentDetails<'_>) -> String {
    let motivo = if details.motivo.is_empty() {
        "No especificado"
    } else {
        details.motivo
    };
    format!(
        "Hola {nombre},\n\n\
         Tu cita ha sido agendada con éxito.\n\
         Fecha: {fecha}\n\
         Hora: {hora}\n\
         Motivo: {motivo}\n\n\
         Te contactaremos si hay algún cambio.\n",
        nombre = details.nombre,
        fecha = details.fecha,
        hora = details.hora,
        motivo = motivo,
    )
}

/// Notice sent to the admin address for every new appointment.
pub fn admin_notice_body(details: &AppointmentDetails<'_>) -> String {
    format!(
        "Se ha registrado una nueva cita:\n\n\
         Cliente: {nombre}\n\
         Correo: {correo}\n\
         Fecha: {fecha}\n\
         Hora: {hora}\n\
         Motivo: {motivo}\n",
        nombre = details.nombre,
        correo = details.correo,
        fecha = details.fecha,
        hora = details.hora,
        motivo = details.motivo,
    )
}

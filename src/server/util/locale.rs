//! Bot-facing strings in the languages a guild can select.

use super::placeholder::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Indonesian,
}

impl Language {
    pub const CODES: [&'static str; 2] = ["en", "id"];

    /// Resolves a guild's language setting; unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "id" => Self::Indonesian,
            _ => Self::English,
        }
    }

    pub fn is_supported(code: &str) -> bool {
        Self::CODES.contains(&code)
    }

    /// Looks up a string and fills its `{placeholders}`.
    pub fn format(self, text: Text, vars: &[(&str, &str)]) -> String {
        render(self.get(text), vars)
    }

    pub fn get(self, text: Text) -> &'static str {
        match self {
            Self::English => english(text),
            Self::Indonesian => indonesian(text),
        }
    }
}

/// Keys of localised strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    TicketWelcome,
    TicketCreated,
    TicketCreateFailed,
    NotTicketChannel,
    OptionMissing,
    OptionDisabled,
    MissingRoles,
    SteamRequired,
    AlreadyOpen,
    AlreadyClaimed,
    NotClaimer,
    AlreadyClosed,
    AutoCloseWarning,
    AutoClosed,
    CannotRemoveOwner,
    StatsTitle,
    StatsTotal,
    StatsOpen,
    StatsClosed,
    StatsAverageResponse,
    SteamLinked,
    SteamUnlinked,
    SteamNotLinked,
    SteamInvalid,
}

fn english(text: Text) -> &'static str {
    match text {
        Text::TicketWelcome => {
            "Welcome {user}! Support will be with you shortly.\n\nPlease describe your issue in detail."
        }
        Text::TicketCreated => "✅ Your ticket has been created: {channel}",
        Text::TicketCreateFailed => "❌ Failed to create ticket. Please contact an administrator.",
        Text::NotTicketChannel => "❌ This command can only be used in a ticket channel.",
        Text::OptionMissing => "❌ This ticket option no longer exists.",
        Text::OptionDisabled => "❌ This ticket option is currently disabled.",
        Text::MissingRoles => "❌ You need one of the following roles to open this ticket: {roles}",
        Text::SteamRequired => {
            "❌ **Steam Integration Required**\nYou must link your Steam account to open this ticket.\nUse `/steam link` first."
        }
        Text::AlreadyOpen => "❌ You already have an open ticket: {channel}",
        Text::AlreadyClaimed => "❌ This ticket is already claimed by {user}",
        Text::NotClaimer => "❌ Only the person who claimed this ticket can unclaim it.",
        Text::AlreadyClosed => "❌ This ticket is already closed.",
        Text::AutoCloseWarning => {
            "⚠️ This ticket has been inactive and will be closed automatically in {hours} hour(s) unless someone replies."
        }
        Text::AutoClosed => "This ticket was closed automatically due to inactivity.",
        Text::CannotRemoveOwner => "❌ Cannot remove the ticket owner.",
        Text::StatsTitle => "📊 Ticket Statistics",
        Text::StatsTotal => "Total Tickets",
        Text::StatsOpen => "Open Tickets",
        Text::StatsClosed => "Closed Tickets",
        Text::StatsAverageResponse => "Avg. Response Time",
        Text::SteamLinked => "✅ Your Steam ID `{steam_id}` has been linked.",
        Text::SteamUnlinked => "✅ Your Steam account has been unlinked.",
        Text::SteamNotLinked => "❌ You have not linked a Steam account.",
        Text::SteamInvalid => {
            "❌ Invalid Steam ID format. Please use your Steam64 ID (17 digits starting with 7656)."
        }
    }
}

fn indonesian(text: Text) -> &'static str {
    match text {
        Text::TicketWelcome => {
            "Selamat datang {user}! Tim support akan segera membantu Anda.\n\nSilakan jelaskan masalah Anda secara detail."
        }
        Text::TicketCreated => "✅ Tiket Anda telah dibuat: {channel}",
        Text::TicketCreateFailed => "❌ Gagal membuat tiket. Silakan hubungi administrator.",
        Text::NotTicketChannel => "❌ Perintah ini hanya dapat digunakan di channel tiket.",
        Text::OptionMissing => "❌ Opsi tiket ini sudah tidak ada.",
        Text::OptionDisabled => "❌ Opsi tiket ini sedang dinonaktifkan.",
        Text::MissingRoles => "❌ Anda memerlukan salah satu role berikut untuk membuka tiket ini: {roles}",
        Text::SteamRequired => {
            "❌ **Integrasi Steam Diperlukan**\nAnda harus menautkan akun Steam untuk membuka tiket ini.\nGunakan `/steam link` terlebih dahulu."
        }
        Text::AlreadyOpen => "❌ Anda sudah memiliki tiket yang terbuka: {channel}",
        Text::AlreadyClaimed => "❌ Tiket ini sudah diklaim oleh {user}",
        Text::NotClaimer => "❌ Hanya orang yang mengklaim tiket ini yang dapat membatalkan klaim.",
        Text::AlreadyClosed => "❌ Tiket ini sudah ditutup.",
        Text::AutoCloseWarning => {
            "⚠️ Tiket ini tidak aktif dan akan ditutup otomatis dalam {hours} jam jika tidak ada balasan."
        }
        Text::AutoClosed => "Tiket ini ditutup otomatis karena tidak ada aktivitas.",
        Text::CannotRemoveOwner => "❌ Tidak dapat menghapus pemilik tiket.",
        Text::StatsTitle => "📊 Statistik Tiket",
        Text::StatsTotal => "Total Tiket",
        Text::StatsOpen => "Tiket Terbuka",
        Text::StatsClosed => "Tiket Ditutup",
        Text::StatsAverageResponse => "Rata-rata Waktu Respon",
        Text::SteamLinked => "✅ Steam ID `{steam_id}` Anda telah ditautkan.",
        Text::SteamUnlinked => "✅ Akun Steam Anda telah dilepas.",
        Text::SteamNotLinked => "❌ Anda belum menautkan akun Steam.",
        Text::SteamInvalid => {
            "❌ Format Steam ID tidak valid. Gunakan Steam64 ID (17 digit diawali 7656)."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(Language::from_code("fr"), Language::English);
        assert_eq!(Language::from_code("ID"), Language::Indonesian);
    }

    #[test]
    fn formats_placeholders() {
        let text = Language::Indonesian.format(Text::AlreadyOpen, &[("channel", "<#1>")]);
        assert_eq!(text, "❌ Anda sudah memiliki tiket yang terbuka: <#1>");
    }

    #[test]
    fn only_listed_codes_are_supported() {
        assert!(Language::is_supported("en"));
        assert!(Language::is_supported("id"));
        assert!(!Language::is_supported("de"));
    }
}

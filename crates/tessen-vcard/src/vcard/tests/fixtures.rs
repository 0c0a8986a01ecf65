//! Shared vCard fixtures.

pub const FULL_CARD: &str = "BEGIN:VCARD\n\
VERSION:3.0\n\
PRODID:-//test//EN\n\
FN:Dr. John Q. Smith\n\
N:Smith;John;Quincy;Dr.;Jr.\n\
EMAIL;TYPE=WORK:john@work.example\n\
EMAIL;TYPE=HOME:john@home.example\n\
TEL;TYPE=HOME;TYPE=PREF:+1-555-0100\n\
TEL;TYPE=CELL:+1-555-0101\n\
TEL;TYPE=FAX;TYPE=WORK:+1-555-0102\n\
ADR;TYPE=HOME:;;22 Oak Ave;Springfield;IL;62704;US\n\
ORG:Acme Corp\n\
ROLE:Engineer\n\
URL:https://example.com/john\n\
NICKNAME:Johnny\n\
BDAY:1975-03-20\n\
CATEGORIES:Family,Colleagues\n\
NOTE:Met at conference\\, 2019.\n\
X-SPOUSE:Jane\n\
END:VCARD\n";

/// vCard 2.1 style input: bare parameter shorthand, CRLF endings and a
/// quoted-printable note.
pub const LEGACY_CARD: &str = "BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
FN:Jane Roe\r\n\
TEL;HOME;VOICE:555-0100\r\n\
TEL;CELL:555-0101\r\n\
NOTE;ENCODING=QUOTED-PRINTABLE:Caf=C3=A9 notes\r\n\
END:VCARD\r\n";

//! User-facing status messages, per operation and locale.

use crate::models::artifact::OperationKind;
use crate::models::settings::Locale;

#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[cfg(test)]
    fn locale(&self) -> Locale {
        self.locale
    }

    /// Shown when submission is rejected because a required artifact is missing.
    pub fn missing_input(&self, kind: OperationKind) -> &'static str {
        match (self.locale, kind) {
            (Locale::English, OperationKind::Encrypt) => "Please select a file to encrypt",
            (Locale::English, OperationKind::DecryptFromArchive) => {
                "Please select a ZIP or RAR archive"
            }
            (Locale::English, OperationKind::DecryptFromDiscreteArtifacts) => {
                "Please select all required files"
            }
            (Locale::Spanish, OperationKind::Encrypt) => {
                "Por favor, selecciona un archivo para encriptar"
            }
            (Locale::Spanish, OperationKind::DecryptFromArchive) => {
                "Por favor, selecciona un archivo ZIP o RAR"
            }
            (Locale::Spanish, OperationKind::DecryptFromDiscreteArtifacts) => {
                "Por favor, selecciona todos los archivos requeridos"
            }
        }
    }

    pub fn processing(&self, kind: OperationKind) -> &'static str {
        match (self.locale, kind) {
            (Locale::English, OperationKind::Encrypt) => "Encrypting file...",
            (Locale::English, OperationKind::DecryptFromArchive) => "Decrypting from archive...",
            (Locale::English, OperationKind::DecryptFromDiscreteArtifacts) => {
                "Decrypting individual files..."
            }
            (Locale::Spanish, OperationKind::Encrypt) => "Encriptando archivo...",
            (Locale::Spanish, OperationKind::DecryptFromArchive) => {
                "Desencriptando desde archivo comprimido..."
            }
            (Locale::Spanish, OperationKind::DecryptFromDiscreteArtifacts) => {
                "Desencriptando archivos individuales..."
            }
        }
    }

    pub fn success(&self, kind: OperationKind) -> &'static str {
        match (self.locale, kind) {
            (Locale::English, OperationKind::Encrypt) => {
                "File encrypted successfully. The download will start automatically."
            }
            (Locale::English, _) => {
                "File decrypted successfully. The download will start automatically."
            }
            (Locale::Spanish, OperationKind::Encrypt) => {
                "Archivo encriptado exitosamente. La descarga comenzará automáticamente."
            }
            (Locale::Spanish, _) => {
                "Archivo desencriptado exitosamente. La descarga comenzará automáticamente."
            }
        }
    }

    pub fn failure(&self, kind: OperationKind) -> &'static str {
        match (self.locale, kind) {
            (Locale::English, OperationKind::Encrypt) => {
                "Error encrypting the file. Please try again."
            }
            (Locale::English, OperationKind::DecryptFromArchive) => {
                "Error decrypting the file. Check that the archive is valid."
            }
            (Locale::English, OperationKind::DecryptFromDiscreteArtifacts) => {
                "Error decrypting the file. Check that all files are valid."
            }
            (Locale::Spanish, OperationKind::Encrypt) => {
                "Error al encriptar el archivo. Por favor intenta nuevamente."
            }
            (Locale::Spanish, OperationKind::DecryptFromArchive) => {
                "Error al desencriptar el archivo. Verifica que el archivo sea válido."
            }
            (Locale::Spanish, OperationKind::DecryptFromDiscreteArtifacts) => {
                "Error al desencriptar el archivo. Verifica que todos los archivos sean válidos."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [OperationKind; 3] = [
        OperationKind::Encrypt,
        OperationKind::DecryptFromArchive,
        OperationKind::DecryptFromDiscreteArtifacts,
    ];

    #[test]
    fn default_locale_is_english() {
        assert_eq!(Messages::default().locale(), Locale::English);
    }

    #[test]
    fn archive_validation_mentions_archive() {
        let en = Messages::new(Locale::English);
        assert!(en.missing_input(OperationKind::DecryptFromArchive).contains("archive"));
        let es = Messages::new(Locale::Spanish);
        assert!(es.missing_input(OperationKind::DecryptFromArchive).contains("ZIP o RAR"));
    }

    #[test]
    fn failure_messages_differ_per_operation() {
        for locale in [Locale::English, Locale::Spanish] {
            let messages = Messages::new(locale);
            let failures: Vec<&str> = KINDS.iter().map(|k| messages.failure(*k)).collect();
            assert_ne!(failures[0], failures[1]);
            assert_ne!(failures[1], failures[2]);
            assert_ne!(failures[0], failures[2]);
        }
    }

    #[test]
    fn locales_produce_distinct_texts() {
        let en = Messages::new(Locale::English);
        let es = Messages::new(Locale::Spanish);
        for kind in KINDS {
            assert_ne!(en.processing(kind), es.processing(kind));
            assert_ne!(en.success(kind), es.success(kind));
            assert_ne!(en.missing_input(kind), es.missing_input(kind));
        }
    }
}

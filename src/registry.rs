//! Name-indexed codec dispatch
//!
//! A [`Registry`] is built once with [`RegistryBuilder`] and then passed to
//! whoever needs to encode or decode by format name. It is immutable after
//! [`RegistryBuilder::build`] and can be shared across threads.

use crate::config::Options;
use crate::error::{Error, Result};
use crate::formats;
use crate::types::Node;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Turns a node into bytes
pub trait Encoder: Send + Sync {
    fn encode(&self, value: &Node, options: &Options) -> Result<Vec<u8>>;
}

/// Turns bytes into a node
pub trait Decoder: Send + Sync {
    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Node>;
}

impl<F> Encoder for F
where
    F: Fn(&Node, &Options) -> Result<Vec<u8>> + Send + Sync,
{
    fn encode(&self, value: &Node, options: &Options) -> Result<Vec<u8>> {
        self(value, options)
    }
}

impl<F> Decoder for F
where
    F: Fn(&[u8], &Options) -> Result<Node> + Send + Sync,
{
    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Node> {
        self(bytes, options)
    }
}

/// Immutable table of encoders and decoders by name
#[derive(Clone, Default)]
pub struct Registry {
    encoders: HashMap<String, Arc<dyn Encoder>>,
    decoders: HashMap<String, Arc<dyn Decoder>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with every built-in format
    pub fn standard() -> Self {
        RegistryBuilder::standard().build()
    }

    /// Encode `value` with the format registered as `name`
    ///
    /// Options are passed to the codec untouched.
    pub fn encode(&self, name: &str, value: &Node, options: &Options) -> Result<Vec<u8>> {
        let encoder = self
            .encoders
            .get(name)
            .ok_or_else(|| Error::UnknownFormat(name.to_string()))?;
        debug!(format = name, kind = ?value.tag(), "encode");
        encoder.encode(value, options)
    }

    /// Decode `bytes` with the format registered as `name`
    pub fn decode(&self, name: &str, bytes: &[u8], options: &Options) -> Result<Node> {
        let decoder = self
            .decoders
            .get(name)
            .ok_or_else(|| Error::UnknownFormat(name.to_string()))?;
        debug!(format = name, len = bytes.len(), "decode");
        decoder.decode(bytes, options)
    }

    pub fn has_encoder(&self, name: &str) -> bool {
        self.encoders.contains_key(name)
    }

    pub fn has_decoder(&self, name: &str) -> bool {
        self.decoders.contains_key(name)
    }

    /// Names with an encoder, sorted
    pub fn encoder_names(&self) -> Vec<&str> {
        sorted_names(&self.encoders)
    }

    /// Names with a decoder, sorted
    pub fn decoder_names(&self) -> Vec<&str> {
        sorted_names(&self.decoders)
    }
}

fn sorted_names<V>(table: &HashMap<String, V>) -> Vec<&str> {
    let mut names: Vec<&str> = table.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("encoders", &self.encoder_names())
            .field("decoders", &self.decoder_names())
            .finish()
    }
}

/// Collects codecs before freezing them into a [`Registry`]
///
/// Later registrations under the same name replace earlier ones, so callers
/// can override a built-in format.
#[derive(Default)]
pub struct RegistryBuilder {
    encoders: HashMap<String, Arc<dyn Encoder>>,
    decoders: HashMap<String, Arc<dyn Decoder>>,
}

impl RegistryBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with the built-in formats
    pub fn standard() -> Self {
        formats::install(Self::new())
    }

    pub fn encoder(mut self, name: impl Into<String>, encoder: impl Encoder + 'static) -> Self {
        self.encoders.insert(name.into(), Arc::new(encoder));
        self
    }

    pub fn decoder(mut self, name: impl Into<String>, decoder: impl Decoder + 'static) -> Self {
        self.decoders.insert(name.into(), Arc::new(decoder));
        self
    }

    /// Register one value as both encoder and decoder
    pub fn codec<C>(mut self, name: impl Into<String>, codec: C) -> Self
    where
        C: Encoder + Decoder + 'static,
    {
        let name = name.into();
        let codec = Arc::new(codec);
        self.encoders.insert(name.clone(), codec.clone());
        self.decoders.insert(name, codec);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            encoders: self.encoders,
            decoders: self.decoders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn unknown_format() {
        let registry = Registry::standard();
        assert!(matches!(
            registry.decode("not-a-real-format", b"...", &Options::new()),
            Err(Error::UnknownFormat(ref name)) if name == "not-a-real-format"
        ));
        assert!(matches!(
            registry.encode("not-a-real-format", &Node::Null, &Options::new()),
            Err(Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn unknown_format_invokes_no_codec() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let registry = Registry::builder()
            .decoder("counted", |_: &[u8], _: &Options| -> Result<Node> {
                CALLS.fetch_add(1, Ordering::SeqCst);
                Ok(Node::Null)
            })
            .build();

        assert!(registry.decode("other", b"", &Options::new()).is_err());
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
        assert!(registry.decode("counted", b"", &Options::new()).is_ok());
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn standard_names() {
        let registry = Registry::standard();
        let mut expected = vec!["array", "bytes", "int", "structured-object", "tree", "utf8"];
        if cfg!(feature = "image") {
            expected.extend(["image-jpeg", "image-png"]);
            expected.sort_unstable();
        }
        assert_eq!(registry.encoder_names(), expected);
        assert_eq!(registry.encoder_names(), registry.decoder_names());
    }

    #[test]
    fn options_forwarded_verbatim() {
        let registry = Registry::builder()
            .encoder("echo-options", |_: &Node, options: &Options| -> Result<Vec<u8>> {
                let quality = options.get("quality").and_then(Node::as_int);
                Ok(vec![quality.unwrap_or(0) as u8])
            })
            .build();

        let options = Options::new().with("quality", 87i64).with("bogus", "ignored");
        assert_eq!(
            registry.encode("echo-options", &Node::Null, &options).unwrap(),
            vec![87]
        );
    }

    #[test]
    fn later_registration_replaces() {
        let registry = RegistryBuilder::standard()
            .encoder("bytes", |_: &Node, _: &Options| -> Result<Vec<u8>> {
                Ok(b"override".to_vec())
            })
            .build();
        assert_eq!(
            registry
                .encode("bytes", &Node::Bytes(vec![1]), &Options::new())
                .unwrap(),
            b"override"
        );
        assert!(registry.has_decoder("bytes"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_dispatch_is_logged_both_ways() {
        let registry = Registry::builder()
            .encoder("failing", |_: &Node, _: &Options| -> Result<Vec<u8>> {
                Err(Error::Pack("boom".into()))
            })
            .decoder("failing", |_: &[u8], _: &Options| -> Result<Node> {
                Err(Error::Pack("boom".into()))
            })
            .build();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(registry.encode("failing", &Node::Null, &Options::new()).is_err());
            assert!(registry.decode("failing", b"", &Options::new()).is_err());
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("encode"), "{logs}");
        assert!(logs.contains("decode"), "{logs}");
        assert_eq!(logs.matches("failing").count(), 2, "{logs}");
    }

    #[test]
    fn registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}

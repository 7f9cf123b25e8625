use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::{debug, trace};

use super::{sentence_id_of, ParseOptions, Sentence, TalkerId, BEGIN_CHAR};
use crate::ais::AisParser;
use crate::prelude::*;

/// A sentence produced by a [SentenceParser], either a plain [Sentence] or a wrapper
/// around one.
pub trait ParsedSentence: Any + Debug + Send + Sync {
    fn sentence(&self) -> &Sentence;
    fn sentence_mut(&mut self) -> &mut Sentence;
    fn as_any(&self) -> &dyn Any;
}

impl dyn ParsedSentence {
    /// Access the concrete sentence type, e.g., [crate::ais::AisSentence].
    #[must_use]
    pub fn downcast_ref<T: ParsedSentence>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}

impl ParsedSentence for Sentence {
    fn sentence(&self) -> &Sentence {
        self
    }

    fn sentence_mut(&mut self) -> &mut Sentence {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Constructs sentences of one registered type.
pub trait SentenceParser: Send + Sync {
    /// Begin char of the sentences this parser produces.
    fn begin_char(&self) -> char {
        BEGIN_CHAR
    }

    /// Parse raw text into a sentence.
    ///
    /// # Errors
    /// Any error constructing the sentence from `nmea`.
    fn parse(&self, nmea: &str, options: &ParseOptions) -> Result<Box<dyn ParsedSentence>>;

    /// Create an empty sentence.
    ///
    /// # Errors
    /// Any error constructing the sentence.
    fn create(&self, talker_id: TalkerId, sentence_id: &str) -> Result<Box<dyn ParsedSentence>>;
}

/// Parser for sentences handled as a plain [Sentence] with a fixed number of fields.
#[derive(Debug, Clone)]
pub struct GenericParser {
    field_count: usize,
    begin_char: char,
}

impl GenericParser {
    #[must_use]
    pub fn new(field_count: usize) -> Self {
        Self {
            field_count,
            begin_char: BEGIN_CHAR,
        }
    }

    #[must_use]
    pub fn with_begin_char(mut self, begin_char: char) -> Self {
        self.begin_char = begin_char;
        self
    }
}

impl SentenceParser for GenericParser {
    fn begin_char(&self) -> char {
        self.begin_char
    }

    fn parse(&self, nmea: &str, options: &ParseOptions) -> Result<Box<dyn ParsedSentence>> {
        Ok(Box::new(Sentence::parse_with(nmea, options)?))
    }

    fn create(&self, talker_id: TalkerId, sentence_id: &str) -> Result<Box<dyn ParsedSentence>> {
        Ok(Box::new(Sentence::with_begin_char(
            self.begin_char,
            talker_id,
            sentence_id,
            self.field_count,
        )?))
    }
}

/// Sentence ids registered by default and their field counts.
const DEFAULT_SENTENCES: &[(&str, usize)] = &[
    ("APB", 14),
    ("BOD", 6),
    ("DBT", 6),
    ("DPT", 3),
    ("DTM", 8),
    ("GBS", 8),
    ("GGA", 14),
    ("GLL", 7),
    ("GNS", 12),
    ("GSA", 17),
    ("GST", 8),
    ("GSV", 19),
    ("HDG", 5),
    ("HDM", 2),
    ("HDT", 2),
    ("MTW", 2),
    ("MWD", 8),
    ("MWV", 5),
    ("RMB", 13),
    ("RMC", 12),
    ("ROT", 2),
    ("RPM", 5),
    ("RSA", 4),
    ("RTE", 4),
    ("TXT", 4),
    ("VHW", 8),
    ("VLW", 4),
    ("VTG", 9),
    ("WPL", 5),
    ("XDR", 4),
    ("XTE", 6),
    ("ZDA", 6),
];

/// Talker used to check that a parser produces usable sentences on registration.
const SMOKE_TALKER: TalkerId = TalkerId::ST;

type Registry = HashMap<String, Arc<dyn SentenceParser>>;

fn default_registry() -> Registry {
    let mut parsers: Registry = HashMap::new();
    for (id, field_count) in DEFAULT_SENTENCES {
        parsers.insert((*id).to_string(), Arc::new(GenericParser::new(*field_count)));
    }
    let ais: Arc<dyn SentenceParser> = Arc::new(AisParser);
    for id in crate::ais::AIS_SENTENCE_IDS {
        parsers.insert((*id).to_string(), ais.clone());
    }
    parsers
}

fn same_parser(a: &Arc<dyn SentenceParser>, b: &Arc<dyn SentenceParser>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// Registry mapping sentence ids to the [SentenceParser] that constructs them.
///
/// Lookups take a shared lock and do not block each other; registration takes an
/// exclusive lock.
///
/// # Example
/// ```
/// use nmea::ais::AisSentence;
/// use nmea::sentence::SentenceFactory;
///
/// let factory = SentenceFactory::default();
/// let parsed = factory.create_parser("$GPBOD,234.9,T,228.8,M,RUSKI,*1D").unwrap();
/// assert_eq!(parsed.sentence().sentence_id(), "BOD");
///
/// let parsed = factory
///     .create_parser("!AIVDM,1,1,,A,13u?etPv2;0n:dDPwUM1U1Cb069D,0*24")
///     .unwrap();
/// let vdm = parsed.downcast_ref::<AisSentence>().unwrap();
/// assert_eq!(vdm.number_of_fragments().unwrap(), 1);
/// ```
pub struct SentenceFactory {
    parsers: RwLock<Registry>,
    options: ParseOptions,
}

impl Default for SentenceFactory {
    fn default() -> Self {
        Self {
            parsers: RwLock::new(default_registry()),
            options: ParseOptions::default(),
        }
    }
}

impl SentenceFactory {
    /// Factory without any registered parsers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            parsers: RwLock::new(HashMap::new()),
            options: ParseOptions::default(),
        }
    }

    /// Process wide factory, created with the default registrations on first use.
    pub fn global() -> &'static SentenceFactory {
        static GLOBAL: OnceLock<SentenceFactory> = OnceLock::new();
        GLOBAL.get_or_init(SentenceFactory::default)
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    fn lookup(&self, sentence_id: &str) -> Result<Arc<dyn SentenceParser>> {
        let parsers = self.parsers.read().unwrap_or_else(PoisonError::into_inner);
        match parsers.get(sentence_id) {
            Some(parser) => Ok(parser.clone()),
            None => {
                trace!(sentence_id, "no parser registered");
                Err(Error::UnsupportedSentenceId(sentence_id.to_string()))
            }
        }
    }

    /// Parse `nmea` with the parser registered for its sentence id.
    ///
    /// # Errors
    /// [Error::MalformedSentence] if `nmea` is not a sentence or does not use the begin char
    /// of its registered parser, [Error::UnsupportedSentenceId] if no parser is registered
    /// for its sentence id, or any error from the parser itself.
    pub fn create_parser(&self, nmea: &str) -> Result<Box<dyn ParsedSentence>> {
        let sentence_id = sentence_id_of(nmea)?;
        let parser = self.lookup(sentence_id)?;
        if !nmea.starts_with(parser.begin_char()) {
            return Err(Error::MalformedSentence(format!(
                "{sentence_id} sentences must begin with {:?}",
                parser.begin_char()
            )));
        }
        parser.parse(nmea, &self.options)
    }

    /// Create an empty sentence of the type registered for `sentence_id`.
    ///
    /// # Errors
    /// [Error::UnsupportedSentenceId] if no parser is registered for `sentence_id`, or any
    /// error from the parser itself.
    pub fn create_empty(
        &self,
        talker_id: TalkerId,
        sentence_id: &str,
    ) -> Result<Box<dyn ParsedSentence>> {
        self.lookup(sentence_id)?.create(talker_id, sentence_id)
    }

    /// Register `parser` for `sentence_id`, replacing any existing registration.
    ///
    /// # Errors
    /// [Error::InvalidParser] if `parser` cannot create a sentence for `sentence_id`.
    pub fn register_parser(
        &self,
        sentence_id: &str,
        parser: Arc<dyn SentenceParser>,
    ) -> Result<()> {
        let smoke = parser
            .create(SMOKE_TALKER, sentence_id)
            .map_err(|err| Error::InvalidParser(format!("{sentence_id}: {err}")))?;
        let sentence = smoke.sentence();
        if sentence.sentence_id() != sentence_id {
            return Err(Error::InvalidParser(format!(
                "{sentence_id}: parser created {} sentence",
                sentence.sentence_id()
            )));
        }
        if sentence.begin_char() != parser.begin_char() {
            return Err(Error::InvalidParser(format!(
                "{sentence_id}: parser created sentence with begin char {:?}, expected {:?}",
                sentence.begin_char(),
                parser.begin_char()
            )));
        }

        let mut parsers = self.parsers.write().unwrap_or_else(PoisonError::into_inner);
        if parsers.insert(sentence_id.to_string(), parser).is_some() {
            debug!(sentence_id, "replaced parser");
        } else {
            debug!(sentence_id, "registered parser");
        }
        Ok(())
    }

    /// Remove every registration of `parser`, returning the number of sentence ids
    /// removed.
    pub fn unregister_parser(&self, parser: &Arc<dyn SentenceParser>) -> usize {
        let mut parsers = self.parsers.write().unwrap_or_else(PoisonError::into_inner);
        let before = parsers.len();
        parsers.retain(|_, registered| !same_parser(registered, parser));
        let removed = before - parsers.len();
        debug!(removed, "unregistered parser");
        removed
    }

    #[must_use]
    pub fn has_parser(&self, sentence_id: &str) -> bool {
        self.parsers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(sentence_id)
    }

    /// Registered sentence ids, sorted.
    #[must_use]
    pub fn list_parsers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .parsers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Restore the default registrations, dropping any custom ones.
    pub fn reset(&self) {
        *self.parsers.write().unwrap_or_else(PoisonError::into_inner) = default_registry();
        debug!("registry reset to defaults");
    }
}

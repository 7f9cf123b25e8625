use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::*;

macro_rules! talker_ids {
    ($($id:ident => $desc:literal,)+) => {
        /// Talker identifier, the code of the equipment class emitting a sentence.
        ///
        /// [TalkerId::P] marks proprietary sentences, whose address is a single `P` followed
        /// by a manufacturer code and sentence type.
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum TalkerId {
            $(
                #[doc = $desc]
                $id,
            )+
        }

        impl TalkerId {
            /// All known talker ids.
            pub const ALL: &'static [TalkerId] = &[$(TalkerId::$id,)+];

            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(TalkerId::$id => stringify!($id),)+
                }
            }

            #[must_use]
            pub fn description(&self) -> &'static str {
                match self {
                    $(TalkerId::$id => $desc,)+
                }
            }
        }

        impl FromStr for TalkerId {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $(stringify!($id) => Ok(TalkerId::$id),)+
                    _ => Err(Error::UnsupportedTalkerId(s.to_string())),
                }
            }
        }
    };
}

talker_ids! {
    AB => "Independent AIS base station",
    AD => "Dependent AIS base station",
    AG => "Autopilot, general",
    AI => "Mobile AIS station",
    AN => "AIS aids to navigation",
    AP => "Autopilot, magnetic",
    AR => "AIS receiving station",
    AS => "AIS limited base station",
    AT => "AIS transmitting station",
    AX => "AIS simplex repeater",
    BD => "BeiDou satellite system",
    BI => "Bilge systems",
    BN => "Bridge navigational watch alarm system",
    CD => "Digital selective calling",
    CS => "Communications, satellite",
    CT => "Communications, radio-telephone (MF/HF)",
    CV => "Communications, radio-telephone (VHF)",
    CX => "Communications, scanning receiver",
    DE => "DECCA navigation",
    DF => "Direction finder",
    DU => "Duplex repeater station",
    EC => "Electronic chart system",
    EI => "Electronic chart display and information system",
    EP => "Emergency position indicating radio beacon",
    ER => "Engine room monitoring systems",
    GA => "Galileo positioning system",
    GB => "BeiDou positioning system",
    GI => "NavIC positioning system",
    GL => "GLONASS positioning system",
    GN => "Global navigation satellite system",
    GP => "Global positioning system",
    GQ => "QZSS positioning system",
    HC => "Heading, magnetic compass",
    HE => "Heading, north seeking gyro",
    HN => "Heading, non north seeking gyro",
    II => "Integrated instrumentation",
    IN => "Integrated navigation",
    LC => "Loran-C",
    P => "Proprietary sentence",
    RA => "Radar and/or ARPA",
    SD => "Sounder, depth",
    SN => "Electronic positioning system, other",
    SS => "Sounder, scanning",
    ST => "Skytraq debug",
    TI => "Turn rate indicator",
    VD => "Velocity sensor, doppler",
    VM => "Velocity sensor, speed log, water, magnetic",
    VW => "Velocity sensor, speed log, water, mechanical",
    WI => "Weather instruments",
    YX => "Transducer",
    ZA => "Timekeeper, atomic clock",
    ZC => "Timekeeper, chronometer",
    ZQ => "Timekeeper, quartz",
    ZV => "Timekeeper, radio update",
}

impl TalkerId {
    /// Extract the talker id from a raw sentence.
    ///
    /// # Example
    /// ```
    /// use nmea::sentence::TalkerId;
    ///
    /// assert_eq!(TalkerId::parse_str("$GPBOD,234.9,T").unwrap(), TalkerId::GP);
    /// assert_eq!(TalkerId::parse_str("$PGRME,15.0,M").unwrap(), TalkerId::P);
    /// ```
    ///
    /// # Errors
    /// [Error::MalformedSentence] if there is no address to read the id from, or
    /// [Error::UnsupportedTalkerId] if the id is unknown.
    pub fn parse_str(nmea: &str) -> Result<TalkerId> {
        let address = super::address(nmea)?;
        if address.starts_with('P') {
            return Ok(TalkerId::P);
        }
        address
            .get(..2)
            .ok_or_else(|| Error::MalformedSentence(format!("address too short in {nmea:?}")))?
            .parse()
    }
}

impl Display for TalkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("GP".parse::<TalkerId>().unwrap(), TalkerId::GP);
        assert_eq!("AI".parse::<TalkerId>().unwrap(), TalkerId::AI);
        assert_eq!(
            "XX".parse::<TalkerId>().unwrap_err(),
            Error::UnsupportedTalkerId("XX".to_string())
        );
    }

    #[test]
    fn test_as_str_roundtrips_all() {
        for id in TalkerId::ALL {
            assert_eq!(id.as_str().parse::<TalkerId>().unwrap(), *id);
        }
    }

    #[test]
    fn test_parse_str() {
        assert_eq!(
            TalkerId::parse_str("!AIVDM,1,1,,A,13u?etPv2;0n:dDPwUM1U1Cb069D,0").unwrap(),
            TalkerId::AI
        );
        assert!(matches!(
            TalkerId::parse_str("$XXBOD,1"),
            Err(Error::UnsupportedTalkerId(_))
        ));
        assert!(matches!(
            TalkerId::parse_str("GPBOD,1"),
            Err(Error::MalformedSentence(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(TalkerId::GN.to_string(), "GN");
        assert_eq!(TalkerId::P.description(), "Proprietary sentence");
    }
}

use super::*;

/// An untagged event of a portrait combined with accessories.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct CombinedEvent {
    pub token_id: ContractTokenId,
    /// Filled slots, parallel to `accessory_ids`.
    pub types: Vec<Accessory>,
    pub accessory_ids: Vec<ContractTokenId>,
}

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum CustomEvent {
    /// Combining a portrait with accessories
    Combined(CombinedEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::Combined(event) => {
                out.write_u8(COMBINED_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            COMBINED_TAG => CombinedEvent::deserial(source).map(CustomEvent::Combined),
            _ => Err(ParseError::default()),
        }
    }
}

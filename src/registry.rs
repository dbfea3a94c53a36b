use crate::model::{ParamKind, ParamValue};

/// Default value(s) a built-in parameter carries on a freshly created node.
#[derive(Clone, Copy, Debug)]
pub enum ParamDefault {
    Bool(bool),
    Index(i64),
    Doubles(&'static [f64]),
    Text(&'static str),
}

/// One parameter of a built-in node type.
#[derive(Clone, Copy, Debug)]
pub struct ParamDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
    pub default: ParamDefault,
}

impl ParamDef {
    pub fn default_values(&self) -> Vec<ParamValue> {
        match self.default {
            ParamDefault::Bool(v) => vec![ParamValue::Bool(v)],
            ParamDefault::Index(v) => vec![ParamValue::Int(v)],
            ParamDefault::Doubles(vs) => vs.iter().map(|&v| ParamValue::Double(v)).collect(),
            ParamDefault::Text(v) => vec![ParamValue::Text(v.to_string())],
        }
    }
}

/// A processing operator supplied by the host, identified by a fixed string.
#[derive(Clone, Copy, Debug)]
pub struct TypeDef {
    pub id: &'static str,
    pub label: &'static str,
    pub params: &'static [ParamDef],
}

const fn bool_param(name: &'static str, label: &'static str, default: bool) -> ParamDef {
    ParamDef {
        name,
        label,
        kind: ParamKind::Boolean,
        default: ParamDefault::Bool(default),
    }
}

const fn channel_choice(name: &'static str, label: &'static str, default: &'static str) -> ParamDef {
    ParamDef {
        name,
        label,
        kind: ParamKind::Choice,
        default: ParamDefault::Text(default),
    }
}

// Process toggles shared by the premultiply pair. Alpha is off by default;
// descriptors turn it on explicitly.
const PROCESS_TOGGLES: &[ParamDef] = &[
    bool_param("NatronOfxParamProcessR", "R", true),
    bool_param("NatronOfxParamProcessG", "G", true),
    bool_param("NatronOfxParamProcessB", "B", true),
    bool_param("NatronOfxParamProcessA", "A", false),
];

const MERGE_PARAMS: &[ParamDef] = &[
    ParamDef {
        name: "operation",
        label: "Operation",
        kind: ParamKind::Choice,
        // Stock operator list puts "over" at index 28.
        default: ParamDefault::Index(28),
    },
    ParamDef {
        name: "mix",
        label: "Mix",
        kind: ParamKind::Double,
        default: ParamDefault::Doubles(&[1.0]),
    },
    bool_param("enableMask_Mask", "Mask", false),
    ParamDef {
        name: "maskChannel_Mask",
        label: "Mask Channel",
        kind: ParamKind::Choice,
        default: ParamDefault::Index(4),
    },
    bool_param("maskInvert", "Invert Mask", false),
    ParamDef {
        name: "userTextArea",
        label: "",
        kind: ParamKind::Text,
        default: ParamDefault::Text(""),
    },
];

const SOLID_PARAMS: &[ParamDef] = &[
    ParamDef {
        name: "size",
        label: "Size",
        kind: ParamKind::Double,
        default: ParamDefault::Doubles(&[1920.0, 1080.0]),
    },
    ParamDef {
        name: "color",
        label: "Color",
        kind: ParamKind::Color,
        default: ParamDefault::Doubles(&[0.0, 0.0, 0.0]),
    },
    bool_param("NatronOfxParamProcessA", "A", false),
];

const SHUFFLE_PARAMS: &[ParamDef] = &[
    channel_choice("outputChannelsChoice", "Output Layer", "RGBA"),
    channel_choice("outputRChoice", "R", "B.r"),
    channel_choice("outputGChoice", "G", "B.g"),
    channel_choice("outputBChoice", "B", "B.b"),
    channel_choice("outputAChoice", "A", "B.a"),
];

const INPUT_PARAMS: &[ParamDef] = &[
    bool_param("optional", "Optional", false),
    bool_param("isMask", "Mask", false),
];

/// Every built-in type the reference host knows. A real application would
/// back this with its plugin cache.
pub const BUILT_IN_TYPES: &[TypeDef] = &[
    TypeDef {
        id: "fr.inria.built-in.Dot",
        label: "Dot",
        params: &[],
    },
    TypeDef {
        id: "fr.inria.built-in.Input",
        label: "Input",
        params: INPUT_PARAMS,
    },
    TypeDef {
        id: "fr.inria.built-in.Output",
        label: "Output",
        params: &[],
    },
    TypeDef {
        id: "net.sf.openfx.MergePlugin",
        label: "Merge",
        params: MERGE_PARAMS,
    },
    TypeDef {
        id: "net.sf.openfx.Premult",
        label: "Premult",
        params: PROCESS_TOGGLES,
    },
    TypeDef {
        id: "net.sf.openfx.ShufflePlugin",
        label: "Shuffle",
        params: SHUFFLE_PARAMS,
    },
    TypeDef {
        id: "net.sf.openfx.Solid",
        label: "Solid",
        params: SOLID_PARAMS,
    },
    TypeDef {
        id: "net.sf.openfx.Unpremult",
        label: "Unpremult",
        params: PROCESS_TOGGLES,
    },
];

pub fn lookup(type_id: &str) -> Option<&'static TypeDef> {
    BUILT_IN_TYPES.iter().find(|t| t.id == type_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_known_types() {
        assert!(lookup("net.sf.openfx.MergePlugin").is_some());
        assert!(lookup("fr.inria.built-in.Dot").is_some());
        assert!(lookup("net.sf.openfx.DoesNotExist").is_none());
    }

    #[test]
    fn merge_defaults_match_the_stock_operator_table() {
        let merge = lookup("net.sf.openfx.MergePlugin").unwrap();
        let op = merge.params.iter().find(|p| p.name == "operation").unwrap();
        assert_eq!(op.default_values(), vec![ParamValue::Int(28)]);

        let mix = merge.params.iter().find(|p| p.name == "mix").unwrap();
        assert_eq!(mix.default_values(), vec![ParamValue::Double(1.0)]);
    }

    #[test]
    fn type_ids_are_unique() {
        for (i, a) in BUILT_IN_TYPES.iter().enumerate() {
            for b in &BUILT_IN_TYPES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}

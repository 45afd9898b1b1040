//! `<style>` block: CSS animations for spawn, twinkle, pulse, draw-in,
//! flash and drift.
//!
//! The stylesheet is a static template; the only parameter is the canvas
//! size, which sets the pulsing core radius.

use crate::numfmt::whole;

const ANIMATIONS: &str = r#".shard-spawn { animation: spawnIn 0.8s cubic-bezier(0.16, 1, 0.3, 1) both; }
@keyframes spawnIn {
0% { transform: scale(0); opacity: 0; }
60% { transform: scale(1.05); }
100% { transform: scale(1); opacity: 1; }
}
.burst-fade { animation: burstFade 2s ease-out 0.3s both; }
@keyframes burstFade {
0% { opacity: 1; transform: scale(0.3); }
30% { opacity: 1; transform: scale(1.2); }
100% { opacity: 0.15; transform: scale(1); }
}
.core-pulse { animation: corePulse 2s ease-in-out infinite; }
@keyframes corePulse {
0%, 100% { opacity: 0.6; r: {pulse_min}px; }
50% { opacity: 1; r: {pulse_max}px; }
}
.twinkle { animation: twinkle 3s ease-in-out infinite; }
@keyframes twinkle {
0%, 100% { opacity: 0.3; }
50% { opacity: 1; }
}
.nebula-pulse { animation: nebPulse 8s ease-in-out infinite; }
@keyframes nebPulse {
0%, 100% { opacity: 0.8; }
50% { opacity: 1; }
}
.crack-draw { animation: drawCrack 0.6s ease-out both; }
@keyframes drawCrack {
to { stroke-dashoffset: 0; }
}
.lightning-flash { animation: lightningFlash 3s ease-out infinite; }
@keyframes lightningFlash {
0% { opacity: 0; }
5% { opacity: 1; }
10% { opacity: 0.3; }
12% { opacity: 0.8; }
20% { opacity: 0; }
100% { opacity: 0; }
}
.particle-drift { animation: pDrift linear infinite alternate; }
@keyframes pDrift {
0% { transform: translate(0, 0); opacity: 0.3; }
50% { opacity: 0.8; }
100% { transform: translate(var(--drift, 10px), calc(var(--drift, 10px) * -0.7)); opacity: 0.3; }
}
.reflection-pulse { animation: refPulse 4s ease-in-out infinite alternate; }
@keyframes refPulse {
0% { opacity: 0.1; }
100% { opacity: 0.3; }
}
.meta-fade { animation: metaIn 1s ease-out 2s both; }
@keyframes metaIn {
from { opacity: 0; }
to { opacity: 1; }
}
"#;

/// Stylesheet text for a canvas of `size` pixels.
pub fn animation_css(size: f64) -> String {
    ANIMATIONS
        .replace("{pulse_min}", &whole(size * 0.02))
        .replace("{pulse_max}", &whole(size * 0.035))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_radius_scales_with_size() {
        let css = animation_css(800.0);
        assert!(css.contains("r: 16px;"), "{css}");
        assert!(css.contains("r: 28px;"), "{css}");
        assert!(!css.contains("{pulse"));
    }

    #[test]
    fn every_animated_class_has_keyframes() {
        let css = animation_css(800.0);
        for name in [
            "spawnIn",
            "burstFade",
            "corePulse",
            "twinkle",
            "nebPulse",
            "drawCrack",
            "lightningFlash",
            "pDrift",
            "refPulse",
            "metaIn",
        ] {
            assert!(css.contains(&format!("@keyframes {name}")), "missing {name}");
        }
    }
}

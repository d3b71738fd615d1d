//! Tests fuzz safe : flux de commandes aléatoires, invariants vérifiés à CHAQUE pas.
//!
//! But : marteler la machine à états sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur de flux bornée
//! - budget temps global
//!
//! Invariants :
//! - tampon jamais vide, au plus un `.`
//! - la frappe ne dépasse jamais `LONGUEUR_MAX` (un résultat long reste figé)
//! - remplacement <=> état `AttenteOperande`
//! - en `Erreur`, seul C (et MC / vidage historique) change quelque chose
//! - l’historique grandit d’au plus une ligne par commande

use std::time::{Duration, Instant};

use super::commande::{ActionMemoire, Chiffre, Commande, Fonction, Operateur};
use super::evaluateur::{Etat, Evaluateur};
use super::tampon::LONGUEUR_MAX;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération de commandes ------------------------ */

const OPERATEURS: [Operateur; 5] = [
    Operateur::Plus,
    Operateur::Moins,
    Operateur::Fois,
    Operateur::Divise,
    Operateur::Puissance,
];

const MEMOIRE: [ActionMemoire; 4] = [
    ActionMemoire::Effacer,
    ActionMemoire::Rappeler,
    ActionMemoire::Ajouter,
    ActionMemoire::Soustraire,
];

const VALEURS_HISTORIQUE: [&str; 5] = ["1,234", "-7", "0.5", "Error", "12,345,678.25"];

fn gen_commande(rng: &mut Rng) -> Commande {
    // chiffres majoritaires : on veut atteindre le plafond de frappe
    match rng.pick(20) {
        0..=8 => Commande::Chiffre(Chiffre::new(rng.pick(10) as u8).unwrap()),
        9 => Commande::Point,
        10 | 11 => Commande::Operateur(OPERATEURS[rng.pick(5) as usize]),
        12 => Commande::Egal,
        13 => Commande::Fonction(Fonction::TOUTES[rng.pick(5) as usize]),
        14 => Commande::Memoire(MEMOIRE[rng.pick(4) as usize]),
        15 | 16 => Commande::RetourArriere,
        17 => Commande::Effacer,
        _ => Commande::ReutiliserHistorique(
            VALEURS_HISTORIQUE[rng.pick(5) as usize].to_string(),
        ),
    }
}

/* ------------------------ Vérification d’un pas ------------------------ */

fn verifier_pas(avant: &Evaluateur, cmd: &Commande, apres: &Evaluateur) {
    let t = apres.tampon();
    assert!(!t.is_empty(), "tampon vide après {cmd:?}");
    assert!(
        t.matches('.').count() <= 1,
        "plus d’un point: {t:?} après {cmd:?}"
    );

    assert_eq!(
        apres.remplacement(),
        matches!(apres.etat(), Etat::AttenteOperande(_)),
        "drapeau de remplacement incohérent après {cmd:?}"
    );

    let n_avant = avant.historique().len();
    let n_apres = apres.historique().len();
    assert!(
        n_apres == n_avant || n_apres == n_avant + 1,
        "historique {n_avant} -> {n_apres} après {cmd:?}"
    );

    // Frappe au plafond : sans effet (hors remplacement)
    if matches!(cmd, Commande::Chiffre(_) | Commande::Point)
        && !avant.remplacement()
        && avant.etat() != Etat::Erreur
        && avant.tampon().len() >= LONGUEUR_MAX
        && avant.tampon().parse::<f64>().map(f64::is_finite).unwrap_or(false)
    {
        assert_eq!(apres.tampon(), avant.tampon(), "frappe au-delà du plafond");
    }

    // Frappe partie d’un tampon court : reste sous le plafond
    if matches!(cmd, Commande::Chiffre(_) | Commande::Point) && avant.tampon().len() < LONGUEUR_MAX
    {
        assert!(
            t.len() <= LONGUEUR_MAX,
            "frappe a dépassé le plafond: {t:?}"
        );
    }

    // Erreur collante
    if avant.etat() == Etat::Erreur {
        match cmd {
            Commande::Effacer => {
                assert_eq!(apres.etat(), Etat::Repos);
                assert_eq!(t, "0");
            }
            _ => {
                assert_eq!(apres.etat(), Etat::Erreur, "sortie d’erreur par {cmd:?}");
                assert_eq!(t, "Error");
                assert_eq!(n_apres, n_avant);
            }
        }
    }

    if apres.etat() == Etat::Erreur {
        assert!(apres.operation_en_attente().is_none());
        assert_eq!(apres.affichage(), "Error");
    }
}

fn derouler(seed: u64, pas: usize) -> Evaluateur {
    let mut rng = Rng::new(seed);
    let mut ev = Evaluateur::new();
    for _ in 0..pas {
        let cmd = gen_commande(&mut rng);
        let avant = ev.clone();
        ev.appliquer(cmd.clone());
        verifier_pas(&avant, &cmd, &ev);
    }
    ev
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_invariants_machine_a_etats() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    for seed in 1..=200u64 {
        derouler(seed, 400);
        budget(t0, max);
    }
}

#[test]
fn fuzz_determinisme() {
    for seed in [7u64, 42, 1337] {
        let a = derouler(seed, 300);
        let b = derouler(seed, 300);
        assert_eq!(a.tampon(), b.tampon(), "seed={seed}");
        assert_eq!(a.historique(), b.historique(), "seed={seed}");
        // Debug : une opérande gauche NaN n’est pas égale à elle-même
        assert_eq!(format!("{:?}", a.etat()), format!("{:?}", b.etat()), "seed={seed}");
    }
}

#[test]
fn fuzz_lignes_historique_bien_formees() {
    let ev = derouler(2024, 2000);
    for ligne in ev.historique() {
        let (gauche, droite) = ligne
            .rsplit_once(" = ")
            .unwrap_or_else(|| panic!("ligne sans ' = ': {ligne:?}"));
        assert!(!gauche.is_empty() && !droite.is_empty(), "ligne={ligne:?}");
        assert!(!droite.contains(' '), "résultat avec espace: {ligne:?}");
    }
}

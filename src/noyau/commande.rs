// src/noyau/commande.rs
//
// Vocabulaire d’entrée : chaque clic / touche devient UNE commande discrète.
// Le noyau ne connaît ni egui ni le DOM : l’adaptateur traduit, le noyau consomme.

use std::fmt;

/// Un chiffre décimal 0..=9 (garanti par construction).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chiffre(u8);

impl Chiffre {
    pub fn new(d: u8) -> Option<Self> {
        (d <= 9).then_some(Self(d))
    }

    pub fn depuis_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn valeur(self) -> u8 {
        self.0
    }

    pub fn en_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// Opérateurs binaires (un seul en attente à la fois).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

impl Operateur {
    /// Symbole utilisé dans les lignes d’historique ("3 + 4 = 7").
    pub fn symbole(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "-",
            Operateur::Fois => "*",
            Operateur::Divise => "/",
            Operateur::Puissance => "^",
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

/// Fonctions unaires appliquées au tampon courant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Racine,
    Sin,
    Cos,
    Tan,
    Exp,
}

impl Fonction {
    pub const TOUTES: [Fonction; 5] = [
        Fonction::Racine,
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Exp,
    ];

    /// Nom affiché dans l’historique ("sqrt(9) = 3").
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Racine => "sqrt",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Exp => "exp",
        }
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

/// Touches mémoire : MC / MR / M+ / M-.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionMemoire {
    Effacer,
    Rappeler,
    Ajouter,
    Soustraire,
}

impl ActionMemoire {
    pub fn libelle(self) -> &'static str {
        match self {
            ActionMemoire::Effacer => "MC",
            ActionMemoire::Rappeler => "MR",
            ActionMemoire::Ajouter => "M+",
            ActionMemoire::Soustraire => "M-",
        }
    }
}

/// Événement d’entrée (clic, touche, clic sur l’historique).
#[derive(Clone, Debug, PartialEq)]
pub enum Commande {
    Chiffre(Chiffre),
    Point,
    Operateur(Operateur),
    Egal,
    Fonction(Fonction),
    Memoire(ActionMemoire),
    RetourArriere,
    Effacer,
    /// Valeur finale d’une ligne d’historique cliquée (séparateurs encore présents).
    ReutiliserHistorique(String),
    EffacerHistorique,
}

/// Traduit un caractère tapé au clavier en commande.
///
/// Table reprise du clavier de la calculatrice :
/// - `0`..`9`, `.`
/// - `+ - ^`, `*` ou `x` (multiplier), `/` ou `÷` (diviser)
/// - `=` (Enter est une touche, gérée côté adaptateur)
/// - `c` / `C` (effacer)
pub fn depuis_touche(texte: &str) -> Option<Commande> {
    let mut chars = texte.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    if let Some(d) = Chiffre::depuis_char(c) {
        return Some(Commande::Chiffre(d));
    }

    let cmd = match c {
        '.' => Commande::Point,
        '+' => Commande::Operateur(Operateur::Plus),
        '-' => Commande::Operateur(Operateur::Moins),
        '*' | 'x' => Commande::Operateur(Operateur::Fois),
        '/' | '÷' => Commande::Operateur(Operateur::Divise),
        '^' => Commande::Operateur(Operateur::Puissance),
        '=' => Commande::Egal,
        'c' | 'C' => Commande::Effacer,
        _ => return None,
    };
    Some(cmd)
}
